//! Bounded-window nearest sample lookup over a [`SpatialGrid`].
//!
//! The search only inspects the 5×5 block of cells around the query position. With the
//! packing radius equal to the cell diagonal this covers every sample within one radius,
//! but a nearest sample further than two cells away is reported as missing.
use glam::Vec2;

use crate::grid::{CellCoord, SampleBuffer, SpatialGrid};

/// Cells searched in each direction around the query cell.
pub const WINDOW_REACH: usize = 2;

/// Distance reported when the window holds no sample.
pub const NO_SAMPLE_DISTANCE: f32 = 1e5;

/// Result of a nearest sample lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHit {
    /// Distance from the query position, or [`NO_SAMPLE_DISTANCE`].
    pub distance: f32,
    /// Position of the nearest sample, or the fallback point.
    pub position: Vec2,
    /// Index of the nearest sample in the buffer.
    pub index: Option<usize>,
}

impl NearestHit {
    fn missing(fallback: Vec2) -> Self {
        Self {
            distance: NO_SAMPLE_DISTANCE,
            position: fallback,
            index: None,
        }
    }

    /// Whether a sample was found inside the window.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }
}

/// Finds the closest sample to `p` among the cells within [`WINDOW_REACH`] of `p`'s cell.
///
/// Ties keep the first sample encountered in row-major window order.
pub fn nearest(p: Vec2, grid: &SpatialGrid, samples: &SampleBuffer, fallback: Vec2) -> NearestHit {
    let (xs, ys) = grid.window(grid.cell_of(p), WINDOW_REACH);
    let mut best = NearestHit::missing(fallback);

    for x in xs {
        for y in ys.clone() {
            let Some(index) = grid.get(CellCoord(x, y)) else {
                continue;
            };
            let Some(q) = samples.get(index) else {
                continue;
            };
            let d = (q - p).length();
            if d < best.distance {
                best = NearestHit {
                    distance: d,
                    position: q,
                    index: Some(index),
                };
            }
        }
    }

    best
}
