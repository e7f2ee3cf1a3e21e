pub mod http_fetcher;
pub mod parallel;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use http_fetcher::HttpFetcher;
pub use parallel::{ParallelFetcher, DEFAULT_WORKERS};

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw bytes of a feed document plus the server's declared content type.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("empty response body")]
    EmptyBody,
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFeed, FetchError>;
}
