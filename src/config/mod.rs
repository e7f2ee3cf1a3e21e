//! Run configuration.
//!
//! Settings are read from `~/.config/funnies/config.toml` (or the file
//! given with `--config`). If the default file doesn't exist, one with
//! comments is created. The list of feeds itself lives in a separate JSON
//! file, see [`sources`].

pub mod sources;

pub use sources::load_sources;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::parallel::DEFAULT_WORKERS;
use crate::fetcher::DEFAULT_TIMEOUT;

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the JSON feed list.
    pub feeds: PathBuf,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: PathBuf::from("config.json"),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-feed timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum feeds fetched at once.
    pub workers: usize,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            workers: DEFAULT_WORKERS,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the page and JSON are written to (and served from).
    pub dir: PathBuf,
    /// Handlebars template for the page.
    pub template: PathBuf,
    pub html: String,
    pub json: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            template: PathBuf::from("static/template.html"),
            html: "index.html".to_string(),
            json: "comics.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn html_path(&self) -> PathBuf {
        self.dir.join(&self.html)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. At the default location a missing file
    /// is created with comments and defaults are used. Missing fields fall
    /// back to their defaults either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/funnies/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("funnies").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "Created default config");
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Funnies configuration
#
# Relative paths are resolved from the directory funnies is run in.

# JSON list of feeds: [{"URL": "...", "Name": "...", "ImgComment": "title"}]
feeds = "config.json"

[fetch]
# Seconds to wait for each feed before giving up on it
timeout_secs = 5

# Maximum number of feeds downloaded at the same time
workers = 10

# Override the User-Agent header
# user_agent = "funnies/0.1.0"

[output]
# Where the page and JSON data are written
dir = "."
template = "static/template.html"
html = "index.html"
json = "comics.json"

[server]
# Port used by `funnies serve`
port = 8080
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse feed list at {path}: {source}")]
    Sources {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid feed URL '{url}': {source}")]
    InvalidFeedUrl {
        url: String,
        source: url::ParseError,
    },
}
