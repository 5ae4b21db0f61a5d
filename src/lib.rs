//! # sitewatch
//!
//! Periodically fetches a web page and sends an email when its content changes.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler ─┐
//!            ├─> CheckCoordinator ─> PageFetcher
//! /check-now ┘         │
//!                      ├─> ChangeDetector (snapshot)
//!                      └─> Notifier (on change)
//! ```
//!
//! Every check, scheduled or manual, goes through
//! [`CheckCoordinator::run_cycle`](coordinator::CheckCoordinator::run_cycle),
//! which runs one cycle at a time so a single page change produces a single email.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch the page once
//! sitewatch check
//!
//! # Run the watcher
//! EMAIL_USER=bot@gmail.com EMAIL_PASS=app-password sitewatch serve
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires the fetcher, notifier, coordinator
/// and ping relay together from a [`Config`](config::Config).
pub mod app;

/// Command-line interface using clap.
///
/// - `serve` - run the watcher (default)
/// - `check` - fetch the page once
pub mod cli;

/// Configuration from defaults, a TOML file and environment variables.
pub mod config;

/// Serialized check cycles.
pub mod coordinator;

/// Interval scheduler and companion ping relay.
pub mod daemon;

/// Snapshot comparison.
pub mod detector;

/// Snapshots, check results and notification requests.
pub mod domain;

/// HTTP page fetching.
///
/// - [`PageFetcher`](fetcher::PageFetcher): async trait for retrieving a page
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Change notifications.
///
/// - [`Notifier`](notifier::Notifier): async trait for sending a notice
/// - [`SmtpNotifier`](notifier::SmtpNotifier): lettre-based SMTP implementation
pub mod notifier;

/// axum routes for liveness and manual triggering.
pub mod server;
