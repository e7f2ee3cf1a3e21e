//! Turns a decoded `<item>` into a [`Comic`].

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use thiserror::Error;

use crate::domain::{Comic, Published, RawItem, DEFAULT_IMAGE_ATTR};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid image selector: {0}")]
    Selector(String),
}

/// A comic whose date may still need the feed-level fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComic {
    pub comic: Comic,
    /// `None` when the item's `pubDate` was missing or unparseable.
    pub published: Option<Published>,
}

impl PendingComic {
    pub fn needs_fallback(&self) -> bool {
        self.published.is_none()
    }

    /// Finish the comic, using `fallback` only if the item had no usable date.
    pub fn resolve(self, fallback: Option<&Published>) -> Comic {
        let mut comic = self.comic;
        comic.set_published(self.published.as_ref().or(fallback));
        comic
    }
}

pub struct ItemExtractor {
    image_attr: String,
    images: Selector,
    now: DateTime<Utc>,
}

impl ItemExtractor {
    /// `image_attr` names the `<img>` attribute read as the caption.
    pub fn new(image_attr: &str, now: DateTime<Utc>) -> Result<Self, ExtractError> {
        let image_attr = if image_attr.is_empty() {
            DEFAULT_IMAGE_ATTR
        } else {
            image_attr
        };
        let images =
            Selector::parse("img").map_err(|e| ExtractError::Selector(format!("{:?}", e)))?;

        Ok(Self {
            image_attr: image_attr.to_string(),
            images,
            now,
        })
    }

    pub fn extract(&self, item: &RawItem) -> PendingComic {
        let mut comic = Comic::new(item.title.as_str(), item.link.as_str());

        let published = Published::parse(&item.pub_date, self.now);
        comic.set_published(published.as_ref());

        if let Some((url, caption)) = self.first_image(&item.description) {
            comic.image_url = url;
            comic.image_comment = caption;
        }

        comic.sanitize();
        PendingComic { comic, published }
    }

    /// `src` and caption of the first `<img>` with a non-empty `src`.
    fn first_image(&self, html: &str) -> Option<(String, String)> {
        let fragment = Html::parse_fragment(html);

        fragment.select(&self.images).find_map(|img| {
            let element = img.value();
            let src = element.attr("src").filter(|s| !s.is_empty())?;
            let caption = element.attr(&self.image_attr).unwrap_or_default();
            Some((src.to_string(), caption.to_string()))
        })
    }
}
