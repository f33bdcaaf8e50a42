//! Bucket fill.
//!
//! The traversal is an explicit-stack depth first search over 4-connected cells, so a fully
//! connected 64x64 grid never recurses. The filled region only depends on connectivity, not on
//! the order neighbors are explored in.

use crate::color::Color;
use crate::grid::{Grid, GridError};

/// Indices of every cell 4-connected to `seed` through cells of the seed's color, sorted.
pub fn fill_region(grid: &Grid, seed: usize) -> Result<Vec<usize>, GridError> {
    let target = grid.get(seed)?;
    let cells = grid.cells();
    let mut visited = vec![false; cells.len()];
    let mut region = Vec::new();
    let mut stack = vec![seed];
    visited[seed] = true;

    // Cells are marked when pushed, so each one enters the stack at most once
    while let Some(index) = stack.pop() {
        region.push(index);
        for neighbor in grid.neighbors4(index) {
            if !visited[neighbor] && cells[neighbor] == target {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }

    region.sort_unstable();
    Ok(region)
}

/// Repaints the region connected to `seed` with `new_color`.
///
/// Returns the grid unchanged when the seed already has `new_color`.
pub fn flood_fill(grid: &Grid, seed: usize, new_color: Color) -> Result<Grid, GridError> {
    let target = grid.get(seed)?;
    if target == new_color {
        return Ok(grid.clone());
    }

    let region = fill_region(grid, seed)?;
    let mut cells = grid.cells().to_vec();
    for &index in &region {
        cells[index] = new_color;
    }

    log::trace!("filled {} cells from {seed} with {new_color}", region.len());
    Grid::from_cells(grid.width(), grid.height(), cells)
}

/// Layer-aware fill: like [`flood_fill`], but a fill never starts from a transparent cell.
///
/// Empty cells are not paint, so clicking one leaves the layer unchanged.
pub fn fill_layer(grid: &Grid, seed: usize, new_color: Color) -> Result<Grid, GridError> {
    if grid.get(seed)?.is_transparent() {
        return Ok(grid.clone());
    }
    flood_fill(grid, seed, new_color)
}
