use axum::extract::State;
use tracing::{error, info};

use crate::server::{ServerState, CHECK_COMPLETED_MESSAGE, LIVENESS_MESSAGE};

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Runs a cycle and waits for it. Answers the same way whatever the outcome:
/// the response confirms a check happened, not that something changed.
///
/// The cycle runs in its own task, so a client that disconnects early does
/// not cut it short between recording a change and sending the notice.
pub async fn check_now(State(state): State<ServerState>) -> &'static str {
    info!("Manual trigger received");

    let coordinator = state.coordinator.clone();
    match tokio::spawn(async move { coordinator.run_cycle().await }).await {
        Ok(report) => info!(
            result = report.result.label(),
            notified = report.notified,
            "Manual check finished"
        ),
        Err(e) => error!(error = %e, "Manual check task failed"),
    }

    CHECK_COMPLETED_MESSAGE
}
