use crate::color::Color;
use crate::document::{DEFAULT_DIMENSION, DocumentSettings};
use crate::stroke::StrokeCommit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file used by the command shell
pub const CONFIG_ENV: &str = "PIXEL_PAINT_CONFIG";

/// Config file used when [`CONFIG_ENV`] is not set
pub const DEFAULT_CONFIG_FILE: &str = "pixel_paint.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Editor settings.
///
/// Every field has a default so older or partial config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory used by the file-backed drawing store
    pub store_dir: PathBuf,
    /// Canvas width for new documents
    pub default_width: usize,
    /// Canvas height for new documents
    pub default_height: usize,
    /// Shown wherever no visible layer has paint
    pub background: Color,
    /// Maximum number of undo snapshots, unlimited when absent
    pub history_limit: Option<usize>,
    /// Maximum number of layers, unlimited when absent
    pub max_layers: Option<usize>,
    /// How pencil and eraser drags are recorded in history
    pub stroke_commit: StrokeCommit,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("data"),
            default_width: DEFAULT_DIMENSION,
            default_height: DEFAULT_DIMENSION,
            background: Color::WHITE,
            history_limit: None,
            max_layers: None,
            stroke_commit: StrokeCommit::PerCell,
        }
    }
}

impl EditorConfig {
    /// Loads the config at `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::ParseError {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads the config named by [`CONFIG_ENV`], or [`DEFAULT_CONFIG_FILE`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }

    /// The subset of settings a document needs
    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            history_limit: self.history_limit,
            max_layers: self.max_layers,
            stroke_commit: self.stroke_commit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.default_width, 16);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r##"{"default_width": 32, "background": "#000000", "stroke_commit": "per_stroke"}"##,
        )
        .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.default_width, 32);
        assert_eq!(config.default_height, 16);
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.stroke_commit, StrokeCommit::PerStroke);
        assert_eq!(config.store_dir, PathBuf::from("data"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"background": "pink"}"#).unwrap();
        assert!(matches!(
            EditorConfig::load(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
