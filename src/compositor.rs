//! Flattens the layer stack into the single grid that gets displayed.
//!
//! For each cell the top-most visible layer that is not transparent there wins, which is the same
//! as painting visible layers bottom (index 0) to top. Nothing is cached: the stack is at most
//! 64x64 cells per layer and recomputing on read is cheap.

use crate::color::Color;
use crate::grid::Grid;
use crate::layer::Layer;

/// Composites `layers` into a `width` x `height` grid.
///
/// Cells no visible layer paints stay [`Color::Transparent`]. Layers whose size does not match
/// contribute only the overlapping prefix of their cells.
pub fn composite(width: usize, height: usize, layers: &[Layer]) -> Grid {
    Grid::new(width, height).map_indexed(|index, _| {
        layers
            .iter()
            .rev()
            .filter(|layer| layer.visible)
            .filter_map(|layer| layer.grid().cells().get(index).copied())
            .find(|color| !color.is_transparent())
            .unwrap_or(Color::Transparent)
    })
}

/// Substitutes `background` for every transparent cell, for opaque display
pub fn with_background(grid: &Grid, background: Color) -> Grid {
    grid.map(|color| if color.is_transparent() { background } else { color })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_with(cells: Vec<Color>) -> Layer {
        Layer::from_grid("test", Grid::from_cells(2, 1, cells).unwrap())
    }

    #[test]
    fn transparent_top_shows_bottom() {
        let bottom = layer_with(vec![Color::RED, Color::Transparent]);
        let top = layer_with(vec![Color::Transparent, Color::Transparent]);
        let out = composite(2, 1, &[bottom, top]);
        assert_eq!(out.get(0), Ok(Color::RED));
        assert_eq!(out.get(1), Ok(Color::Transparent));
    }

    #[test]
    fn opaque_top_wins() {
        let bottom = layer_with(vec![Color::RED, Color::RED]);
        let top = layer_with(vec![Color::BLUE, Color::Transparent]);
        let out = composite(2, 1, &[bottom, top]);
        assert_eq!(out.cells(), &[Color::BLUE, Color::RED]);
    }

    #[test]
    fn invisible_layer_contributes_nothing() {
        let mut hidden = layer_with(vec![Color::GREEN, Color::GREEN]);
        hidden.set_visible(false);
        let out = composite(2, 1, &[hidden]);
        assert!(out.cells().iter().all(Color::is_transparent));
    }

    #[test]
    fn topmost_visible_paint_wins_over_hidden_top() {
        let bottom = layer_with(vec![Color::RED, Color::RED]);
        let middle = layer_with(vec![Color::Transparent, Color::GREEN]);
        let mut top = layer_with(vec![Color::BLUE, Color::BLUE]);
        top.set_visible(false);
        let out = composite(2, 1, &[bottom, middle, top]);
        assert_eq!(out.cells(), &[Color::RED, Color::GREEN]);
    }

    #[test]
    fn background_fills_gaps() {
        let out = composite(2, 1, &[layer_with(vec![Color::RED, Color::Transparent])]);
        let shown = with_background(&out, Color::WHITE);
        assert_eq!(shown.cells(), &[Color::RED, Color::WHITE]);
    }
}
