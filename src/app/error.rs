use thiserror::Error;

use crate::config::ConfigError;
use crate::render::RenderError;

#[derive(Error, Debug)]
pub enum FunniesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FunniesError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_sources;

    fn read_feeds(path: &std::path::Path) -> Result<usize> {
        Ok(load_sources(path)?.len())
    }

    #[test]
    fn test_config_error_converts() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_feeds(&dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, FunniesError::Config(ConfigError::Io { .. })));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: FunniesError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert!(matches!(err, FunniesError::Io(_)));
        assert_eq!(err.to_string(), "IO error: port taken");
    }
}
