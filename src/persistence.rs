use crate::color::Color;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while talking to a drawing store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize drawing: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access drawing store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Drawing not found: {0}")]
    NotFound(String),

    #[error("Invalid drawing name: {0:?}")]
    InvalidName(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// One layer of a saved drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingLayer {
    pub name: String,
    pub pixels: Vec<Color>,
}

/// A drawing as it is stored: plain dimensions and per-layer pixels, bottom layer first.
///
/// Nothing here is validated; [`crate::Document::from_drawing`] accepts or rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub layers: Vec<DrawingLayer>,
    /// Flat pixel list written by single-layer versions of the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<Color>>,
}

impl Drawing {
    /// The layers of this drawing, treating a legacy flat `pixels` list as a single layer
    pub fn layers(&self) -> Vec<DrawingLayer> {
        match (&self.pixels, self.layers.is_empty()) {
            (Some(pixels), true) => vec![DrawingLayer {
                name: "Layer 1".to_owned(),
                pixels: pixels.clone(),
            }],
            _ => self.layers.clone(),
        }
    }
}

/// Checks that `name` can be used as a drawing name in any store
pub fn validate_name(name: &str) -> PersistenceResult<()> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || name != name.trim();
    if invalid {
        Err(PersistenceError::InvalidName(name.to_owned()))
    } else {
        Ok(())
    }
}

/// The save/load boundary of the editor.
///
/// Implementations decide how a name maps to storage and what happens on overwrite; the editor
/// only relies on the three operations below.
pub trait DrawingStore {
    /// Names of all saved drawings, sorted
    fn list_drawings(&self) -> PersistenceResult<Vec<String>>;

    /// Upserts `drawing` under its name and returns a confirmation message
    fn save_drawing(&self, drawing: &Drawing) -> PersistenceResult<String>;

    /// Loads the drawing saved as `name`
    fn load_drawing(&self, name: &str) -> PersistenceResult<Drawing>;
}

fn saved_message(name: &str) -> String {
    format!("Drawing '{name}' saved")
}

/// Stores each drawing as `<name>.json` inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where drawing files are stored
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PersistenceResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl DrawingStore for FileStore {
    fn list_drawings(&self) -> PersistenceResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            // Skip files that could not be loaded back by name
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    fn save_drawing(&self, drawing: &Drawing) -> PersistenceResult<String> {
        let path = self.path_for(&drawing.name)?;

        // Create the store directory if it doesn't exist
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(drawing)?;
        fs::write(&path, json)?;

        log::info!("Saved drawing {:?} to {}", drawing.name, path.display());
        Ok(saved_message(&drawing.name))
    }

    fn load_drawing(&self, name: &str) -> PersistenceResult<Drawing> {
        let path = self.path_for(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(name.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut drawing: Drawing = serde_json::from_str(&json)?;
        // The file name is authoritative
        drawing.name = name.to_owned();
        Ok(drawing)
    }
}

/// Keeps drawings in memory; useful for tests and for running without a disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    drawings: Mutex<BTreeMap<String, Drawing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingStore for MemoryStore {
    fn list_drawings(&self) -> PersistenceResult<Vec<String>> {
        Ok(self.drawings.lock().keys().cloned().collect())
    }

    fn save_drawing(&self, drawing: &Drawing) -> PersistenceResult<String> {
        validate_name(&drawing.name)?;
        self.drawings
            .lock()
            .insert(drawing.name.clone(), drawing.clone());
        Ok(saved_message(&drawing.name))
    }

    fn load_drawing(&self, name: &str) -> PersistenceResult<Drawing> {
        validate_name(name)?;
        self.drawings
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(name.to_owned()))
    }
}
