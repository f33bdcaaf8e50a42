use crate::color::Color;
use crate::grid::{Grid, GridError};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Creates a fresh, never before seen id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single layer in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: LayerId,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer currently contributes to the composite
    pub visible: bool,
    /// Pixels of the layer
    grid: Grid,
}

impl Layer {
    /// Creates a visible layer with every cell transparent
    pub fn new(width: usize, height: usize, name: &str) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            grid: Grid::new(width, height),
        }
    }

    /// Creates a layer from existing pixels, e.g. when loading a drawing
    pub fn from_grid(name: &str, grid: Grid) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            grid,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Returns this layer with one cell repainted
    pub fn paint(&self, index: usize, color: Color) -> Result<Layer, GridError> {
        Ok(self.with_grid(self.grid.with_cell(index, color)?))
    }

    /// Returns this layer wrapping a full replacement grid, keeping id, name and visibility
    pub fn with_grid(&self, grid: Grid) -> Layer {
        Self {
            id: self.id,
            name: self.name.clone(),
            visible: self.visible,
            grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_blank_and_visible() {
        let layer = Layer::new(4, 4, "Layer 1");
        assert!(layer.visible);
        assert_eq!(layer.name, "Layer 1");
        assert!(layer.grid().cells().iter().all(Color::is_transparent));
    }

    #[test]
    fn ids_are_unique() {
        let a = Layer::new(1, 1, "a");
        let b = Layer::new(1, 1, "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn paint_returns_updated_copy() {
        let layer = Layer::new(2, 2, "Layer 1");
        let painted = layer.paint(1, Color::RED).unwrap();
        assert_eq!(painted.id, layer.id);
        assert_eq!(painted.grid().get(1), Ok(Color::RED));
        assert_eq!(layer.grid().get(1), Ok(Color::Transparent));
        assert!(layer.paint(9, Color::RED).is_err());
    }
}
