//! Orders series so the most recently updated comes first.
//!
//! The key is the `UnixDate` of each series' first comic. Series are sorted
//! ascending with a stable sort and then reversed, so among equal keys the
//! later input comes first.

use thiserror::Error;

use crate::domain::ComicSeries;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RankError {
    #[error("series '{title}' at position {position} has no comics")]
    EmptySeries { position: usize, title: String },
}

/// Rank `series` most-recent-first. If ranking is impossible the failure is
/// logged and the series are returned in their original order.
pub fn rank(mut series: Vec<ComicSeries>) -> Vec<ComicSeries> {
    if let Err(e) = sort_most_recent_first(&mut series) {
        tracing::error!(error = %e, "Ranking failed, keeping feed order");
    }
    series
}

/// Sort in place, most recent first. Leaves `series` untouched on error.
pub fn sort_most_recent_first(series: &mut [ComicSeries]) -> Result<(), RankError> {
    if let Some((position, empty)) = series.iter().enumerate().find(|(_, s)| s.comics.is_empty()) {
        return Err(RankError::EmptySeries {
            position,
            title: empty.series_title.clone(),
        });
    }

    series.sort_by_key(ComicSeries::latest_unix_date);
    series.reverse();
    Ok(())
}
