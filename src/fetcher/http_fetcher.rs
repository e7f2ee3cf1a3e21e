use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::{FetchError, FetchedFeed, Fetcher, DEFAULT_TIMEOUT};

const USER_AGENT: &str = concat!("funnies/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT, None)
    }

    pub fn with_timeout(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .build()?;

        Ok(Self { client, timeout })
    }

    async fn get(&self, url: &str) -> std::result::Result<FetchedFeed, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.bytes().await?.to_vec();
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(FetchedFeed { body, content_type })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchedFeed, FetchError> {
        // The client timeout covers the request; this one also bounds the body read.
        match tokio::time::timeout(self.timeout, self.get(url)).await {
            Ok(Err(FetchError::Transport(e))) if e.is_timeout() => {
                Err(FetchError::Timeout(self.timeout))
            }
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}
