//! Writes the ranked series out: an HTML page rendered from a handlebars
//! template, and the same data as JSON for the front-end script.

pub mod json;

pub use json::to_legacy_json;

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::{handlebars_helper, Handlebars};
use thiserror::Error;

use crate::config::OutputConfig;
use crate::domain::ComicSeries;

const TEMPLATE_NAME: &str = "comics";

handlebars_helper!(incr: |n: i64| n + 1);
handlebars_helper!(decr: |n: i64| n - 1);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load template {path}: {message}")]
    Template { path: PathBuf, message: String },

    #[error("Failed to render page: {0}")]
    Render(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|e| RenderError::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::build(&source, path)
    }

    pub fn from_source(source: &str) -> Result<Self, RenderError> {
        Self::build(source, Path::new("<inline>"))
    }

    fn build(source: &str, path: &Path) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_helper("incr", Box::new(incr));
        registry.register_helper("decr", Box::new(decr));
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| RenderError::Template {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self { registry })
    }

    pub fn render(&self, series: &[ComicSeries]) -> Result<String, RenderError> {
        self.registry
            .render(TEMPLATE_NAME, &series)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

/// Write the page and the JSON file into `output.dir`.
pub fn write_outputs(
    renderer: &PageRenderer,
    output: &OutputConfig,
    series: &[ComicSeries],
) -> Result<(), RenderError> {
    fs::create_dir_all(&output.dir).map_err(|e| RenderError::Io {
        path: output.dir.clone(),
        source: e,
    })?;

    let html_path = output.html_path();
    let page = renderer.render(series)?;
    write_file(&html_path, page.as_bytes())?;

    let json_path = output.json_path();
    write_file(&json_path, &to_legacy_json(series)?)?;

    tracing::info!(
        html = %html_path.display(),
        json = %json_path.display(),
        series = series.len(),
        "Wrote output"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
