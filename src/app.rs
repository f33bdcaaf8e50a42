use crate::color::Color;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::grid::Grid;
use crate::persistence::{self, DrawingStore, PersistenceError};
use serde_json::error::Category;

/// The editor session: the open document, the drawing store it saves to and the settings both
/// were created with.
pub struct PaintApp {
    document: Document,
    store: Box<dyn DrawingStore>,
    /// Name the document was last saved or loaded as
    drawing_name: Option<String>,
    config: EditorConfig,
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("document", &self.document)
            .field("drawing_name", &self.drawing_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PaintApp {
    /// Opens a blank canvas of the configured default size
    pub fn new(config: EditorConfig, store: Box<dyn DrawingStore>) -> EditorResult<Self> {
        let document = Document::with_settings(
            config.default_width,
            config.default_height,
            config.document_settings(),
        )?;
        Ok(Self {
            document,
            store,
            drawing_name: None,
            config,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn drawing_name(&self) -> Option<&str> {
        self.drawing_name.as_deref()
    }

    /// The composite over the configured background, as it would be shown on screen
    pub fn view(&self) -> Grid {
        self.document.composite_with_background(self.config.background)
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    /// Replaces the document with a blank canvas. The drawing name is forgotten.
    pub fn new_canvas(&mut self, width: usize, height: usize) -> EditorResult<()> {
        self.document.reset(width, height)?;
        self.drawing_name = None;
        log::info!("New {width}x{height} canvas");
        Ok(())
    }

    /// Saves the document under `name` and returns the store's confirmation message
    pub fn save(&mut self, name: &str) -> EditorResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        persistence::validate_name(name).map_err(|_| EditorError::InvalidName(name.to_owned()))?;

        self.document.end_stroke();
        let drawing = self.document.to_drawing(name);
        let message = self.store.save_drawing(&drawing).map_err(|e| {
            log::warn!("Saving {name:?} failed: {e}");
            store_error(e)
        })?;

        self.drawing_name = Some(name.to_owned());
        Ok(message)
    }

    /// Saves under the name the document was last saved or loaded as
    pub fn save_current(&mut self) -> EditorResult<String> {
        let name = self.drawing_name.clone().ok_or(EditorError::EmptyName)?;
        self.save(&name)
    }

    /// Replaces the document with the drawing saved as `name`.
    ///
    /// On any failure the open document is left as it was.
    pub fn load(&mut self, name: &str) -> EditorResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }

        let drawing = self.store.load_drawing(name).map_err(store_error)?;
        let document = Document::from_drawing(&drawing, self.config.document_settings())
            .inspect_err(|e| log::warn!("Rejected drawing {name:?}: {e}"))?;

        self.document.end_stroke();
        self.document = document.with_selection_of(&self.document);
        self.drawing_name = Some(name.to_owned());
        log::info!(
            "Loaded drawing {name:?} ({}x{}, {} layers)",
            self.document.width(),
            self.document.height(),
            self.document.layers().len()
        );
        Ok(())
    }

    /// Names of every saved drawing, sorted
    pub fn list_drawings(&self) -> EditorResult<Vec<String>> {
        self.store.list_drawings().map_err(store_error)
    }
}

fn store_error(error: PersistenceError) -> EditorError {
    match error {
        PersistenceError::InvalidName(name) => EditorError::InvalidName(name),
        // Well-formed JSON that does not describe a drawing
        PersistenceError::SerializationError(e) if e.classify() == Category::Data => {
            EditorError::MalformedDrawing(e.to_string())
        }
        PersistenceError::NotFound(name) => {
            EditorError::PreconditionFailed(format!("no drawing named {name:?}"))
        }
        other => EditorError::PersistenceUnavailable(other),
    }
}
