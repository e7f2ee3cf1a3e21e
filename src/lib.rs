//! # Funnies
//!
//! Collects a list of web comic RSS feeds into one page, most recently
//! updated series first.
//!
//! ## Architecture
//!
//! Each run is a single pass:
//!
//! ```text
//! Fetcher → Decoder → Extractor → Assembler → Ranker → Render
//! ```
//!
//! Feeds are fetched concurrently; everything after the fetch barrier runs
//! sequentially. A feed that fails at any stage is logged and skipped.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch all feeds, write index.html and comics.json, open the page
//! funnies build
//!
//! # Same, then serve the output directory on port 8080
//! funnies serve --port 8080
//!
//! # Print the JSON only
//! funnies json
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the fetcher, decoder and ranking
/// stages together and drives one aggregation run.
pub mod app;

/// Builds a [`ComicSeries`](domain::ComicSeries) from one decoded feed.
pub mod assembler;

/// Command-line interface using clap.
///
/// - `build [--no-open]` - Write the page and JSON, then open the page
/// - `serve [--port]` - Write the page and JSON, then serve them
/// - `json` - Print the JSON to stdout
pub mod cli;

/// Configuration: `config.toml` for run settings and the JSON feed list.
pub mod config;

/// Charset detection and RSS/RDF parsing into raw feed records.
pub mod decoder;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): One configured feed
/// - [`Comic`](domain::Comic): A single strip
/// - [`ComicSeries`](domain::ComicSeries): A feed's strips plus site metadata
/// - [`Published`](domain::Published): Parsed publication date and recency message
pub mod domain;

/// Pulls the comic image and caption out of an item's HTML description.
pub mod extractor;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent fetching with semaphore
pub mod fetcher;

/// Orders series by their most recent comic.
pub mod ranker;

/// HTML and JSON output.
pub mod render;

pub mod server;
