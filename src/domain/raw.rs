/// A decoded RSS channel, before any extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    /// `lastBuildDate` exactly as the feed supplied it.
    pub last_build_date: String,
    pub items: Vec<RawItem>,
}

/// One `<item>` as decoded. `description` still holds HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub guid: String,
    pub pub_date: String,
}
