//! The feed list: a JSON array of [`FeedSource`] objects.

use std::fs;
use std::path::Path;

use url::Url;

use crate::config::ConfigError;
use crate::domain::FeedSource;

pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sources: Vec<FeedSource> =
        serde_json::from_str(&content).map_err(|e| ConfigError::Sources {
            path: path.to_path_buf(),
            source: e,
        })?;

    for source in &sources {
        Url::parse(&source.url).map_err(|e| ConfigError::InvalidFeedUrl {
            url: source.url.clone(),
            source: e,
        })?;
    }

    if sources.is_empty() {
        tracing::warn!(path = %path.display(), "Feed list is empty");
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"[
  {"URL": "https://xkcd.com/rss.xml", "ImgComment": "title", "ImgAttrs": {}},
  {"URL": "https://example.com/feed", "Name": "Example", "Category": "misc"}
]"#,
        )
        .unwrap();

        let sources = load_sources(&path).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].url, "https://xkcd.com/rss.xml");
        assert_eq!(sources[0].image_attr(), "title");
        assert_eq!(sources[1].display_name(), "Example");
        assert_eq!(sources[1].image_attr(), "alt");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"[{"URL": "not a url"}]"#).unwrap();

        assert!(matches!(
            load_sources(&path),
            Err(ConfigError::InvalidFeedUrl { url, .. }) if url == "not a url"
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"[{"URL": }]"#).unwrap();

        assert!(matches!(load_sources(&path), Err(ConfigError::Sources { .. })));
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_sources(&dir.path().join("config.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_empty_list_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[]").unwrap();

        assert!(load_sources(&path).unwrap().is_empty());
    }
}
