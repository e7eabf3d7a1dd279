//! Rectangular, immutable cell grid.
//!
//! Cells are stored row-major in an `im::Vector`, so replacing one cell
//! yields a new grid that shares everything else with the old one.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::coord::{Coordinate, Edge};
use super::error::{EngineError, EngineResult};

/// Rectangular grid of cells, at least 1 × 1.
///
/// Decoding goes through the same checks as construction, so a grid read
/// back from json or a snapshot always has `height * width` cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vector<Cell>,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    height: usize,
    width: usize,
    cells: Vector<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = EngineError;

    fn try_from(raw: RawGrid) -> EngineResult<Self> {
        let expected = cell_count(raw.height, raw.width)?;
        if raw.cells.len() != expected {
            return Err(EngineError::CellCount {
                height: raw.height,
                width: raw.width,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            height: raw.height,
            width: raw.width,
            cells: raw.cells,
        })
    }
}

/// Number of cells in a `height` × `width` grid, rejecting empty or
/// overflowing dimensions.
fn cell_count(height: usize, width: usize) -> EngineResult<usize> {
    if height == 0 || width == 0 {
        return Err(EngineError::EmptyGrid);
    }
    height
        .checked_mul(width)
        .ok_or(EngineError::GridTooLarge { height, width })
}

impl Grid {
    /// Grid of `Empty` cells.
    pub fn empty(height: usize, width: usize) -> EngineResult<Self> {
        let count = cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            cells: std::iter::repeat(Cell::Empty).take(count).collect(),
        })
    }

    /// Build a grid from rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(EngineError::EmptyGrid);
        }

        let mut cells = Vector::new();
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(EngineError::RaggedGrid {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check whether `coord` lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Get the cell at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Get the cell at `coord`, failing on an out-of-range coordinate.
    pub fn cell(&self, coord: Coordinate) -> EngineResult<&Cell> {
        self.get(coord).ok_or(EngineError::OutOfBounds { coord })
    }

    /// The in-grid neighbour of `coord` across `edge`.
    #[must_use]
    pub fn step(&self, coord: Coordinate, edge: Edge) -> Option<Coordinate> {
        coord.neighbor(edge).filter(|&next| self.contains(next))
    }

    /// New grid with the cell at `coord` replaced.
    pub fn with_cell(&self, coord: Coordinate, cell: Cell) -> EngineResult<Self> {
        if !self.contains(coord) {
            return Err(EngineError::OutOfBounds { coord });
        }
        let mut next = self.clone();
        next.cells.set(coord.row * self.width + coord.col, cell);
        Ok(next)
    }

    /// Iterate cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Cell)> + '_ {
        let width = self.width;
        let at = move |i: usize| Coordinate::new(i / width, i % width);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (at(i), cell))
    }

    /// Copy the grid out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.cells[row * self.width + col].clone())
                    .collect()
            })
            .collect()
    }
}
