use crate::color::Color;
use crate::layer::LayerId;
use serde::{Deserialize, Serialize};

/// How a pointer drag with the pencil or eraser is recorded in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCommit {
    /// Every cell changed during the drag is its own undo step
    #[default]
    PerCell,
    /// The whole drag is a single undo step, committed on release
    PerStroke,
}

/// An in-progress pencil or eraser drag.
///
/// Owned by the document while the pointer is held and dropped on release. Nothing else reads
/// it; the cells it paints are merged into the target layer as they happen.
#[derive(Debug, Clone)]
pub struct Stroke {
    layer: LayerId,
    color: Color,
    last_cell: Option<usize>,
    changed: usize,
}

impl Stroke {
    pub fn new(layer: LayerId, color: Color) -> Self {
        Self {
            layer,
            color,
            last_cell: None,
            changed: 0,
        }
    }

    /// The layer this stroke paints on
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// The color written, transparent for the eraser
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of cells this stroke actually changed so far
    pub fn changed(&self) -> usize {
        self.changed
    }

    /// Returns false when the pointer is still over the cell it last painted
    pub(crate) fn enter_cell(&mut self, index: usize) -> bool {
        if self.last_cell == Some(index) {
            return false;
        }
        self.last_cell = Some(index);
        true
    }

    pub(crate) fn record_change(&mut self) {
        self.changed += 1;
    }
}
