use serde::{Deserialize, Serialize};

/// Attribute read from the first `<img>` when a feed doesn't name one.
pub const DEFAULT_IMAGE_ATTR: &str = "alt";

/// One configured feed, as listed in the legacy `config.json` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    #[serde(rename = "URL")]
    pub url: String,
    /// Name of the `<img>` attribute holding the caption.
    #[serde(rename = "ImgComment", default)]
    pub image_attr: String,
    /// Overrides the channel title when non-empty.
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            image_attr: String::new(),
            name: String::new(),
            category: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image_attr(mut self, attr: impl Into<String>) -> Self {
        self.image_attr = attr.into();
        self
    }

    pub fn image_attr(&self) -> &str {
        if self.image_attr.is_empty() {
            DEFAULT_IMAGE_ATTR
        } else {
            &self.image_attr
        }
    }

    /// Display-name override, if one is configured.
    pub fn name_override(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.is_empty())
    }

    /// Label used in log lines: the configured name, else the URL.
    pub fn display_name(&self) -> &str {
        self.name_override().unwrap_or(&self.url)
    }
}
