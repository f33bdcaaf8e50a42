#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod compositor;
pub mod config;
pub mod document;
pub mod error;
pub mod fill;
pub mod grid;
pub mod history;
pub mod input;
pub mod layer;
pub mod persistence;
pub mod stroke;
pub mod tool;

pub use app::PaintApp;
pub use color::Color;
pub use config::EditorConfig;
pub use document::{Document, DocumentSettings};
pub use error::{EditorError, EditorResult};
pub use grid::Grid;
pub use history::History;
pub use input::{CanvasMapping, CanvasPos, InputEvent, route_event};
pub use layer::{Layer, LayerId};
pub use persistence::{Drawing, DrawingStore, FileStore, MemoryStore, PersistenceError};
pub use stroke::{Stroke, StrokeCommit};
pub use tool::Tool;
