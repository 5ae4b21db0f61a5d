use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::app::{AppContext, Result};
use crate::config::{format_interval, Config};
use crate::daemon;
use crate::domain::Snapshot;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::server::build_router;

/// Run the service until Ctrl-C or SIGTERM.
pub async fn serve(ctx: AppContext) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    info!(
        url = %ctx.coordinator.target_url(),
        interval = %format_interval(ctx.check_interval),
        "Watching website"
    );
    let checks = tokio::spawn(daemon::run_checks(
        ctx.coordinator.clone(),
        ctx.check_interval,
        shutdown_rx.clone(),
    ));

    let pings = ctx.ping_relay.map(|relay| {
        info!(
            url = %relay.url(),
            interval = %format_interval(ctx.ping_interval),
            "Companion ping enabled"
        );
        tokio::spawn(relay.run(ctx.ping_interval, shutdown_rx.clone()))
    });

    let router = build_router(ctx.coordinator.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    if let Err(e) = checks.await {
        error!(error = %e, "Check scheduler task failed");
    }
    if let Some(pings) = pings {
        if let Err(e) = pings.await {
            error!(error = %e, "Ping relay task failed");
        }
    }

    info!("Website tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to set up SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Fetch the target once and print what a cycle would compare.
pub async fn check(config: &Config) -> Result<()> {
    let url = config.target_url()?;
    let fetcher = HttpFetcher::new(config.request_timeout()?)?;

    let content = fetcher.fetch(url.as_str()).await?;

    println!("Fetched {}", url);
    println!("Length: {} characters", content.chars().count());
    println!("SHA-256: {}", Snapshot::digest_of(&content));
    Ok(())
}
