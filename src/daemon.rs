//! Recurring background work: the check scheduler and the companion ping relay.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::format_interval;
use crate::coordinator::CheckCoordinator;

/// Runs an action on a fixed interval until shutdown.
///
/// The first run happens one full interval after start. Each run is spawned
/// as its own task, so a slow run never delays the next tick; callers that
/// need serialization provide it themselves.
#[derive(Debug, Clone)]
pub struct Scheduler {
    name: &'static str,
    interval: Duration,
}

impl Scheduler {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self { name, interval }
    }

    /// Tick until `shutdown` changes or its sender is dropped, then wait for
    /// runs already in flight.
    pub async fn run<F, Fut>(&self, action: F, mut shutdown: watch::Receiver<bool>)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        info!(
            task = self.name,
            interval = %format_interval(self.interval),
            "Scheduler started"
        );

        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut runs = JoinSet::new();

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    while runs.try_join_next().is_some() {}
                    debug!(task = self.name, "Tick");
                    runs.spawn(action());
                }
                _ = shutdown.changed() => break,
            }
        }

        while runs.join_next().await.is_some() {}
        info!(task = self.name, "Scheduler stopped");
    }
}

/// Schedule `coordinator.run_cycle()` every `interval`.
pub async fn run_checks(
    coordinator: Arc<CheckCoordinator>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) {
    Scheduler::new("check", interval)
        .run(
            move || {
                let coordinator = coordinator.clone();
                async move {
                    coordinator.run_cycle().await;
                }
            },
            shutdown,
        )
        .await;
}

/// Keeps a companion instance awake with periodic GETs. Best effort only.
#[derive(Debug, Clone)]
pub struct PingRelay {
    client: Client,
    url: Url,
}

impl PingRelay {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue one ping and log what happened. Never fails.
    pub async fn ping_once(&self) {
        info!(url = %self.url, "Pinging companion");

        match self.client.get(self.url.clone()).send().await {
            Ok(response) if response.status().is_success() => {
                info!(status = response.status().as_u16(), "Companion responded");
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Companion responded with error status");
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "Error calling companion");
            }
        }
    }

    pub async fn run(self, interval: Duration, shutdown: watch::Receiver<bool>) {
        let relay = Arc::new(self);
        Scheduler::new("ping", interval)
            .run(
                move || {
                    let relay = relay.clone();
                    async move { relay.ping_once().await }
                },
                shutdown,
            )
            .await;
    }
}
