use crate::color::Color;
use std::sync::Arc;

/// Errors raised by grid accessors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell index {index} is outside a grid of {len} cells")]
    OutOfRange { index: usize, len: usize },
    #[error("expected {expected} cells for a {width}x{height} grid, got {actual}")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// A fixed-size, row-major array of cells.
///
/// A grid always has at least one row and one column. The infallible constructors raise a zero
/// side to one; [`Grid::from_cells`] rejects a zero side because its cells cannot describe it.
///
/// Grids are values: the cell buffer is shared and never written through, so
/// [`Grid::with_cell`] hands back a new grid and every previously returned grid keeps its pixels.
/// Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Arc<[Color]>,
}

impl Grid {
    /// Creates a grid with every cell transparent, each side at least one cell
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::Transparent)
    }

    /// Creates a grid with every cell set to `color`, each side at least one cell
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![color; width * height].into(),
        }
    }

    /// Wraps existing cells, which must be exactly `width * height` long
    pub fn from_cells(width: usize, height: usize, cells: Vec<Color>) -> Result<Self, GridError> {
        let expected = width * height;
        if width == 0 || height == 0 || cells.len() != expected {
            return Err(GridError::SizeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: cells.into(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Grids always hold at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Iterates over the grid one row at a time, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.width)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    fn check(&self, index: usize) -> Result<(), GridError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<Color, GridError> {
        self.check(index)?;
        Ok(self.cells[index])
    }

    /// Returns a copy of this grid with a single cell replaced
    pub fn with_cell(&self, index: usize, color: Color) -> Result<Grid, GridError> {
        self.check(index)?;
        let mut cells = self.cells.to_vec();
        cells[index] = color;
        Ok(Self {
            width: self.width,
            height: self.height,
            cells: cells.into(),
        })
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.width
    }

    pub fn col_of(&self, index: usize) -> usize {
        index % self.width
    }

    /// Index of the cell at `(col, row)`, or `None` outside the grid
    pub fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// The up-to-four orthogonal neighbors of `index`, without wrapping around edges.
    ///
    /// Yields nothing for an index outside the grid.
    pub fn neighbors4(&self, index: usize) -> impl Iterator<Item = usize> {
        let mut neighbors = [None; 4];
        if self.contains(index) {
            let row = self.row_of(index);
            let col = self.col_of(index);
            neighbors = [
                (row > 0).then(|| index - self.width),
                (row + 1 < self.height).then(|| index + self.width),
                (col > 0).then(|| index - 1),
                (col + 1 < self.width).then(|| index + 1),
            ];
        }
        neighbors.into_iter().flatten()
    }

    /// Builds a new grid by mapping every cell
    pub fn map(&self, mut f: impl FnMut(Color) -> Color) -> Grid {
        self.map_indexed(|_, color| f(color))
    }

    /// Builds a new grid by mapping every cell along with its index
    pub fn map_indexed(&self, mut f: impl FnMut(usize, Color) -> Color) -> Grid {
        Self {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(index, &color)| f(index, color))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(grid: &Grid, index: usize) -> Vec<usize> {
        let mut n: Vec<_> = grid.neighbors4(index).collect();
        n.sort_unstable();
        n
    }

    #[test]
    fn new_grid_is_transparent() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.cells().iter().all(Color::is_transparent));
    }

    #[test]
    fn zero_sides_never_make_an_empty_grid() {
        let grid = Grid::new(0, 3);
        assert_eq!((grid.width(), grid.height()), (1, 3));
        assert_eq!(Grid::filled(0, 0, Color::RED).cells(), &[Color::RED]);
        assert!(matches!(
            Grid::from_cells(0, 3, Vec::new()),
            Err(GridError::SizeMismatch { width: 0, .. })
        ));
    }

    #[test]
    fn map_indexed_sees_positions() {
        let grid = Grid::new(3, 1).map_indexed(|i, c| if i == 1 { Color::RED } else { c });
        assert_eq!(grid.cells(), &[Color::Transparent, Color::RED, Color::Transparent]);
    }

    #[test]
    fn get_out_of_range() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.get(4), Err(GridError::OutOfRange { index: 4, len: 4 }));
        assert!(grid.with_cell(4, Color::RED).is_err());
    }

    #[test]
    fn with_cell_leaves_original_untouched() {
        let original = Grid::filled(2, 2, Color::WHITE);
        let painted = original.with_cell(3, Color::RED).unwrap();
        assert_eq!(original.get(3), Ok(Color::WHITE));
        assert_eq!(painted.get(3), Ok(Color::RED));
        assert_eq!(painted.get(0), Ok(Color::WHITE));
    }

    #[test]
    fn row_and_col() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.row_of(6), 1);
        assert_eq!(grid.col_of(6), 2);
        assert_eq!(grid.index_of(2, 1), Some(6));
        assert_eq!(grid.index_of(4, 0), None);
        assert_eq!(grid.index_of(0, 3), None);
    }

    #[test]
    fn neighbors_respect_edges() {
        let grid = Grid::new(3, 3);
        assert_eq!(sorted(&grid, 0), vec![1, 3]);
        assert_eq!(sorted(&grid, 4), vec![1, 3, 5, 7]);
        assert_eq!(sorted(&grid, 5), vec![2, 4, 8]);
        // No wraparound from the end of one row to the start of the next
        assert!(!sorted(&grid, 2).contains(&3));
        assert_eq!(sorted(&grid, 9), Vec::<usize>::new());
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.neighbors4(0).count(), 0);
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(Grid::from_cells(2, 2, vec![Color::RED; 4]).is_ok());
        assert!(matches!(
            Grid::from_cells(2, 2, vec![Color::RED; 3]),
            Err(GridError::SizeMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(Grid::from_cells(0, 2, Vec::new()).is_err());
    }
}
