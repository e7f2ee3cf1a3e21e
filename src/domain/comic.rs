use serde::{Deserialize, Serialize};

use crate::domain::Published;

/// `UnixDate` written for a comic with no usable timestamp
/// (0001-01-01T00:00:00Z). Sorts after every real date.
pub const UNKNOWN_UNIX_DATE: i64 = -62_135_596_800;

/// Legacy feed-proxy placeholders that mean "no description".
const PLACEHOLDER_DESCRIPTIONS: [&str; 2] = [".", "Pipes Output"];

/// A single webcomic strip, ready for display.
///
/// Field names serialize exactly as the front-end reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comic {
    pub title: String,
    pub link: String,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    pub image_comment: String,
    pub date: String,
    pub unix_date: i64,
    pub pub_msg: String,
}

impl Comic {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            unix_date: UNKNOWN_UNIX_DATE,
            ..Default::default()
        }
    }

    /// Copy the date fields from a parsed timestamp, or mark them unknown.
    pub fn set_published(&mut self, published: Option<&Published>) {
        match published {
            Some(p) => {
                self.date = p.date.clone();
                self.unix_date = p.unix_date;
                self.pub_msg = p.pub_msg.clone();
            }
            None => {
                self.date.clear();
                self.unix_date = UNKNOWN_UNIX_DATE;
                self.pub_msg.clear();
            }
        }
    }

    pub fn sanitize(&mut self) {
        if self.title == "." {
            self.title.clear();
        }
        if self.image_comment == self.title {
            self.image_comment.clear();
        }
    }
}

/// Every comic extracted from one feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComicSeries {
    pub series_title: String,
    #[serde(rename = "SiteURL")]
    pub site_url: String,
    pub description: String,
    /// Cursor for the front-end; always written as 0.
    pub index: i64,
    pub comics: Vec<Comic>,
}

impl ComicSeries {
    pub fn sanitize(&mut self) {
        if PLACEHOLDER_DESCRIPTIONS.contains(&self.description.as_str()) {
            self.description = " ".to_string();
        }
        for comic in self.comics.iter_mut() {
            if comic.title == self.series_title {
                comic.title.clear();
            }
        }
    }

    /// `UnixDate` of the first comic, the ranking key.
    pub fn latest_unix_date(&self) -> Option<i64> {
        self.comics.first().map(|c| c.unix_date)
    }
}
