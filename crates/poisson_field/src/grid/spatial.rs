//! Uniform bucket grid over the square sampling domain.
use std::ops::Range;

use glam::Vec2;

use crate::error::{Error, Result};

/// Integer coordinate of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord(
    /// Cell index along the X axis.
    pub usize,
    /// Cell index along the Y axis.
    pub usize,
);

/// Uniform `resolution × resolution` grid where each cell stores at most one sample index.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    resolution: usize,
    domain_extent: f32,
    inv_cell_size: f32,
    cells: Vec<Option<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid covering `[0, domain_extent)²`.
    pub fn try_new(resolution: usize, domain_extent: f32) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidConfig("grid_resolution must be > 0".into()));
        }
        let Some(len) = resolution.checked_mul(resolution) else {
            return Err(Error::InvalidConfig(
                "grid_resolution is too large for a cell array".into(),
            ));
        };
        if !domain_extent.is_finite() || domain_extent <= 0.0 {
            return Err(Error::InvalidConfig(
                "domain_extent must be finite and > 0".into(),
            ));
        }

        Ok(Self {
            resolution,
            domain_extent,
            inv_cell_size: resolution as f32 / domain_extent,
            cells: vec![None; len],
        })
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Side length of the covered square.
    #[inline]
    pub fn domain_extent(&self) -> f32 {
        self.domain_extent
    }

    #[inline]
    fn index(&self, cell: CellCoord) -> usize {
        cell.1 * self.resolution + cell.0
    }

    /// Maps a domain position to its cell, clamping to the grid bounds.
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> CellCoord {
        let max = self.resolution as isize - 1;
        let x = ((p.x * self.inv_cell_size).floor() as isize).clamp(0, max) as usize;
        let y = ((p.y * self.inv_cell_size).floor() as isize).clamp(0, max) as usize;
        CellCoord(x, y)
    }

    /// Returns the sample index stored in `cell`, if any.
    #[inline]
    pub fn get(&self, cell: CellCoord) -> Option<usize> {
        self.cells[self.index(cell)]
    }

    /// Records that sample `index` occupies `cell`.
    ///
    /// The cell must be empty; inserting twice into one cell is a logic error.
    pub fn insert(&mut self, index: usize, cell: CellCoord) {
        let idx = self.index(cell);
        debug_assert!(
            self.cells[idx].is_none(),
            "cell {cell:?} already holds sample {:?}",
            self.cells[idx]
        );
        self.cells[idx] = Some(index);
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Cell ranges of the `(2 * reach + 1)²` window around `cell`, clipped to the grid.
    #[inline]
    pub fn window(&self, cell: CellCoord, reach: usize) -> (Range<usize>, Range<usize>) {
        let xs = cell.0.saturating_sub(reach)..(cell.0 + reach + 1).min(self.resolution);
        let ys = cell.1.saturating_sub(reach)..(cell.1 + reach + 1).min(self.resolution);
        (xs, ys)
    }
}
