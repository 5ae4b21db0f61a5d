//! One fetch-evaluate-notify cycle at a time.
//!
//! Scheduled ticks and manual triggers both land in [`CheckCoordinator::run_cycle`].
//! The detector lives behind an async mutex that is held for the whole cycle,
//! so two callers can never read the same baseline and both report a change.
//! Waiting callers are queued in arrival order and every request runs.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::detector::ChangeDetector;
use crate::domain::{CheckResult, CycleReport, NotificationRequest, Snapshot};
use crate::fetcher::PageFetcher;
use crate::notifier::Notifier;

pub struct CheckCoordinator {
    target_url: String,
    recipient: String,
    fetcher: Arc<dyn PageFetcher + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    detector: Mutex<ChangeDetector>,
}

impl CheckCoordinator {
    pub fn new(
        target_url: impl Into<String>,
        recipient: impl Into<String>,
        fetcher: Arc<dyn PageFetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self {
            target_url: target_url.into(),
            recipient: recipient.into(),
            fetcher,
            notifier,
            detector: Mutex::new(ChangeDetector::new()),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Run one complete cycle. Never fails; problems are logged and reported.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut detector = self.detector.lock().await;

        info!(url = %self.target_url, "Checking website");

        let content = match self.fetcher.fetch(&self.target_url).await {
            Ok(content) => content,
            Err(e) => {
                warn!(url = %self.target_url, error = %e, "Error fetching website");
                return CycleReport {
                    result: CheckResult::FetchFailed {
                        cause: e.to_string(),
                    },
                    notified: false,
                };
            }
        };

        info!(length = content.chars().count(), "Fetched page");

        let result = detector.evaluate(content);
        let snapshot = detector.snapshot();
        let digest = snapshot.map(Snapshot::digest).unwrap_or_default();
        let recorded_at = snapshot
            .map(|s| s.recorded_at().to_rfc3339())
            .unwrap_or_default();

        let notified = match &result {
            CheckResult::FirstSnapshot => {
                info!(digest, %recorded_at, "First snapshot loaded");
                false
            }
            CheckResult::Unchanged => {
                info!(digest, %recorded_at, "No change detected");
                false
            }
            CheckResult::Changed { .. } => {
                info!(digest, %recorded_at, "Change detected, sending notification");
                self.notify(&result).await
            }
            CheckResult::FetchFailed { .. } => false,
        };

        CycleReport { result, notified }
    }

    async fn notify(&self, result: &CheckResult) -> bool {
        let Some(request) =
            NotificationRequest::for_result(result, &self.recipient, &self.target_url)
        else {
            return false;
        };

        match self.notifier.send(&request).await {
            Ok(()) => {
                info!(recipient = %request.recipient, "Notification sent");
                true
            }
            Err(e) => {
                error!(recipient = %request.recipient, error = %e, "Notification failed");
                false
            }
        }
    }

    /// A copy of the current baseline. Waits for any running cycle to finish.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.detector.lock().await.snapshot().cloned()
    }
}
