use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;
use crate::notifier::NotifyError;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;
