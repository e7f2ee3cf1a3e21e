use std::sync::Arc;

use chrono::Utc;

use crate::app::error::Result;
use crate::assembler::assemble;
use crate::config::Config;
use crate::decoder::FeedDecoder;
use crate::domain::{ComicSeries, FeedSource};
use crate::fetcher::{Fetcher, HttpFetcher, ParallelFetcher};
use crate::ranker::rank;

pub struct AppContext {
    pub config: Config,
    pub parallel_fetcher: ParallelFetcher,
    pub decoder: FeedDecoder,
}

/// What happened to the configured feeds during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: usize,
    pub fetch_failed: usize,
    pub decode_failed: usize,
    /// Decoded feeds that yielded no comics.
    pub empty: usize,
    pub series: usize,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            config.fetch.timeout(),
            config.fetch.user_agent.as_deref(),
        )?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher, config.fetch.workers);

        Self {
            config,
            parallel_fetcher,
            decoder: FeedDecoder::new(),
        }
    }

    /// Fetch every source, then decode, assemble and rank the results.
    ///
    /// Feeds that fail at any stage are logged and left out; this never
    /// fails as a whole.
    pub async fn aggregate(&self, sources: Vec<FeedSource>) -> (Vec<ComicSeries>, RunSummary) {
        let mut summary = RunSummary {
            sources: sources.len(),
            ..Default::default()
        };

        tracing::info!("Fetching {} feeds...", sources.len());
        let fetched = self.parallel_fetcher.fetch_all(sources).await;
        summary.fetch_failed = summary.sources - fetched.len();

        let now = Utc::now();
        let mut assembled = Vec::new();

        for (source, result) in fetched {
            let feed = match result {
                Ok(body) => match self.decoder.decode(&body.body, body.content_type.as_deref()) {
                    Ok(feed) => Some(feed),
                    Err(e) => {
                        summary.decode_failed += 1;
                        tracing::warn!(
                            url = %source.url,
                            feed = source.display_name(),
                            category = source.category.as_deref().unwrap_or_default(),
                            error = %e,
                            "Problem decoding feed"
                        );
                        None
                    }
                },
                Err(_) => {
                    summary.fetch_failed += 1;
                    None
                }
            };

            let decoded = feed.is_some();
            match assemble(&source, feed, now) {
                Some(series) => assembled.push(series),
                None if decoded => summary.empty += 1,
                None => {}
            }
        }

        let ranked = rank(assembled);
        summary.series = ranked.len();

        tracing::info!(
            sources = summary.sources,
            fetch_failed = summary.fetch_failed,
            decode_failed = summary.decode_failed,
            empty = summary.empty,
            series = summary.series,
            "Aggregation complete"
        );

        (ranked, summary)
    }
}
