pub mod http_fetcher;

pub use http_fetcher::HttpFetcher;

use async_trait::async_trait;

/// Why a page could not be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait PageFetcher {
    /// Fetch the full body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
