use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::domain::FeedSource;
use crate::fetcher::{FetchError, FetchedFeed, Fetcher};

pub const DEFAULT_WORKERS: usize = 10;

/// Outcome of one fetch task, paired with the source it was for.
pub type FetchOutcome = (FeedSource, Result<FetchedFeed, FetchError>);

/// Fetches many feeds at once, never more than `workers` in flight.
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetch every source and wait for all of them. Results come back in
    /// the order the sources were given.
    pub async fn fetch_all(&self, sources: Vec<FeedSource>) -> Vec<FetchOutcome> {
        let handles = sources.into_iter().map(|source| {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("Semaphore closed");

                let result = fetcher.fetch(&source.url).await;
                if let Err(e) = &result {
                    tracing::warn!(
                        url = %source.url,
                        feed = source.display_name(),
                        category = source.category.as_deref().unwrap_or_default(),
                        error = %e,
                        "Fetch failed"
                    );
                } else {
                    tracing::debug!(url = %source.url, "Fetched feed");
                }
                (source, result)
            })
        });

        let mut results = Vec::new();
        for joined in join_all(handles).await {
            match joined {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::routing::get;
    use axum::Router;
    use tokio::time::Instant;

    use crate::fetcher::HttpFetcher;

    struct StubFetcher {
        bodies: HashMap<String, &'static str>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl StubFetcher {
        fn new(bodies: &[(&str, &'static str)]) -> Self {
            Self {
                bodies: bodies.iter().map(|(u, b)| (u.to_string(), *b)).collect(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedFeed, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.bodies.get(url) {
                Some(body) => Ok(FetchedFeed {
                    body: body.as_bytes().to_vec(),
                    content_type: None,
                }),
                None => Err(FetchError::Status(404)),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order_and_failures() {
        let stub = Arc::new(StubFetcher::new(&[("a", "feed a"), ("c", "feed c")]));
        let parallel = ParallelFetcher::new(stub);

        let sources = vec![FeedSource::new("a"), FeedSource::new("b"), FeedSource::new("c")];
        let results = parallel.fetch_all(sources).await;

        let urls: Vec<&str> = results.iter().map(|(s, _)| s.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
        assert_eq!(results[0].1.as_ref().unwrap().body, b"feed a");
        assert!(matches!(results[1].1, Err(FetchError::Status(404))));
        assert_eq!(results[2].1.as_ref().unwrap().body, b"feed c");
    }

    #[tokio::test]
    async fn test_fetch_all_respects_worker_limit() {
        let stub = Arc::new(StubFetcher::new(&[]));
        let parallel = ParallelFetcher::with_workers(stub.clone(), 2);

        let sources = (0..8).map(|i| FeedSource::new(format!("feed-{}", i))).collect();
        let results = parallel.fetch_all(sources).await;

        assert_eq!(results.len(), 8);
        assert!(stub.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_workers_still_fetches() {
        let stub = Arc::new(StubFetcher::new(&[("a", "x")]));
        let parallel = ParallelFetcher::with_workers(stub, 0);

        let results = parallel.fetch_all(vec![FeedSource::new("a")]).await;
        assert!(results[0].1.is_ok());
    }

    #[tokio::test]
    async fn test_slow_feed_times_out_alone() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "<rss><channel><title>late</title></channel></rss>"
                }),
            )
            .route(
                "/feed.xml",
                get(|| async { "<rss><channel><title>on time</title></channel></rss>" }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let timeout = Duration::from_millis(500);
        let fetcher = Arc::new(HttpFetcher::with_timeout(timeout, None).unwrap());
        let parallel = ParallelFetcher::new(fetcher);
        let sources = vec![
            FeedSource::new(format!("http://{}/slow", address)),
            FeedSource::new(format!("http://{}/feed.xml", address)),
        ];

        let started = Instant::now();
        let results = parallel.fetch_all(sources).await;
        let elapsed = started.elapsed();
        server.abort();

        assert!(matches!(results[0].1, Err(FetchError::Timeout(t)) if t == timeout));
        assert!(results[1].1.is_ok());
        assert!(elapsed < timeout * 3, "took {:?}", elapsed);
    }
}
