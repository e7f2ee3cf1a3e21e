//! Builds one [`ComicSeries`] per successfully decoded feed.

use chrono::{DateTime, Utc};

use crate::domain::{ComicSeries, FeedSource, Published, RawFeed};
use crate::extractor::ItemExtractor;

/// Assemble the series for `source`. Returns `None`, after logging why,
/// when there is no feed or when no item produced a comic.
pub fn assemble(
    source: &FeedSource,
    feed: Option<RawFeed>,
    now: DateTime<Utc>,
) -> Option<ComicSeries> {
    let Some(feed) = feed else {
        tracing::warn!(url = %source.url, feed = source.display_name(), "No feed data, skipping");
        return None;
    };

    let extractor = match ItemExtractor::new(source.image_attr(), now) {
        Ok(extractor) => extractor,
        Err(e) => {
            tracing::error!(url = %source.url, error = %e, "Cannot build item extractor");
            return None;
        }
    };
    // Some feeds only date the channel, not the items.
    let fallback = Published::parse(&feed.last_build_date, now);

    let comics = feed
        .items
        .iter()
        .map(|item| extractor.extract(item).resolve(fallback.as_ref()))
        .collect();

    let mut series = ComicSeries {
        series_title: feed.title,
        site_url: feed.link,
        description: feed.description,
        index: 0,
        comics,
    };
    if let Some(name) = source.name_override() {
        series.series_title = name.to_string();
    }
    series.sanitize();

    if series.comics.is_empty() {
        tracing::warn!(
            url = %source.url,
            feed = source.display_name(),
            category = source.category.as_deref().unwrap_or_default(),
            "No comics in feed, dropping series"
        );
        return None;
    }

    tracing::debug!(
        url = %source.url,
        comics = series.comics.len(),
        "Assembled series"
    );
    Some(series)
}
