use crate::document::Document;
use crate::error::EditorResult;

/// Smallest on-screen size of one cell, in pixels
pub const MIN_PIXEL_SIZE: f32 = 10.0;
/// Largest on-screen size of one cell, in pixels
pub const MAX_PIXEL_SIZE: f32 = 50.0;
/// Default on-screen size of one cell, in pixels
pub const DEFAULT_PIXEL_SIZE: f32 = 20.0;

/// A pointer position relative to the top-left corner of the canvas, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPos {
    pub x: f32,
    pub y: f32,
}

impl CanvasPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Represents the pointer events the canvas reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { position: CanvasPos },
    /// Pointer moved, with or without the button held
    PointerMove { position: CanvasPos, pressed: bool },
    /// Primary button was released
    PointerUp { position: CanvasPos },
    /// Pointer left the canvas
    PointerLeave,
}

/// Maps screen positions onto grid cells at the current zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pixel_size: f32,
}

impl Default for CanvasMapping {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
        }
    }
}

impl CanvasMapping {
    /// Creates a mapping, clamping `pixel_size` to the supported zoom range
    pub fn new(pixel_size: f32) -> Self {
        let mut mapping = Self::default();
        mapping.set_pixel_size(pixel_size);
        mapping
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn set_pixel_size(&mut self, pixel_size: f32) {
        self.pixel_size = if pixel_size.is_nan() {
            DEFAULT_PIXEL_SIZE
        } else {
            pixel_size.clamp(MIN_PIXEL_SIZE, MAX_PIXEL_SIZE)
        };
    }

    /// The cell under `position`, or `None` when it falls outside a `width` x `height` grid
    pub fn cell_at(&self, position: CanvasPos, width: usize, height: usize) -> Option<usize> {
        if !(position.x >= 0.0 && position.y >= 0.0) {
            return None;
        }
        let col = (position.x / self.pixel_size) as usize;
        let row = (position.y / self.pixel_size) as usize;
        (col < width && row < height).then(|| row * width + col)
    }

    /// On-screen size of the whole canvas
    pub fn canvas_size(&self, width: usize, height: usize) -> (f32, f32) {
        (
            width as f32 * self.pixel_size,
            height as f32 * self.pixel_size,
        )
    }
}

/// Routes a pointer event to the document.
///
/// Presses and drags outside the grid are ignored. Releasing or leaving the canvas always ends
/// the current stroke. Returns whether any pixel changed.
pub fn route_event(
    event: &InputEvent,
    document: &mut Document,
    mapping: &CanvasMapping,
) -> EditorResult<bool> {
    let cell = |position: CanvasPos, document: &Document| {
        mapping.cell_at(position, document.width(), document.height())
    };

    match *event {
        InputEvent::PointerDown { position } => match cell(position, document) {
            Some(index) => document.begin_stroke(index),
            None => Ok(false),
        },
        InputEvent::PointerMove {
            position,
            pressed: true,
        } => match cell(position, document) {
            Some(index) => document.continue_stroke(index),
            None => Ok(false),
        },
        InputEvent::PointerMove { pressed: false, .. } => Ok(false),
        InputEvent::PointerUp { .. } | InputEvent::PointerLeave => Ok(document.end_stroke()),
    }
}
