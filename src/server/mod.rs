//! HTTP surface: a liveness probe and a manual trigger.
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Liveness probe, no side effects |
//! | GET | `/check-now` | Run one check cycle, respond when it is done |

pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::coordinator::CheckCoordinator;

pub const LIVENESS_MESSAGE: &str = "Website Tracker is running.";
pub const CHECK_COMPLETED_MESSAGE: &str = "Manual website check completed.";

/// Shared state for handlers.
#[derive(Clone)]
pub struct ServerState {
    pub coordinator: Arc<CheckCoordinator>,
}

pub fn build_router(coordinator: Arc<CheckCoordinator>) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/check-now", get(handlers::check_now))
        .with_state(ServerState { coordinator })
}
