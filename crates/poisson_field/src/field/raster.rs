//! Raster storage for distance field samples.
//!
//! [`RasterGrid`] maps pixel indices to query points in the sampling domain and
//! [`FieldRaster`] stores one [`FieldCell`] per pixel in row-major order.
use glam::Vec2;

use super::FieldCell;
use crate::error::{Error, Result};

/// Pixel layout of a field raster over the square domain `[0, domain_extent)²`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    /// Pixels along X.
    pub width: usize,
    /// Pixels along Y.
    pub height: usize,
    /// Side length of the sampled domain.
    pub domain_extent: f32,
}

impl RasterGrid {
    pub fn try_new(width: usize, height: usize, domain_extent: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidRaster(format!(
                "raster size must be > 0, got {width}x{height}"
            )));
        }
        if width.checked_mul(height).is_none() {
            return Err(Error::InvalidRaster(format!(
                "raster size {width}x{height} overflows the pixel count"
            )));
        }
        if !domain_extent.is_finite() || domain_extent <= 0.0 {
            return Err(Error::InvalidRaster(
                "domain_extent must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            width,
            height,
            domain_extent,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Domain position at the center of pixel `(ix, iy)`.
    #[inline]
    pub fn pixel_to_domain(&self, ix: usize, iy: usize) -> Vec2 {
        Vec2::new(
            (ix as f32 + 0.5) / self.width as f32 * self.domain_extent,
            (iy as f32 + 0.5) / self.height as f32 * self.domain_extent,
        )
    }

    /// Pixel containing the domain position `p`; may lie outside the raster.
    #[inline]
    pub fn domain_to_pixel(&self, p: Vec2) -> (isize, isize) {
        (
            (p.x / self.domain_extent * self.width as f32).floor() as isize,
            (p.y / self.domain_extent * self.height as f32).floor() as isize,
        )
    }
}

/// Row-major raster of [`FieldCell`]s.
#[derive(Clone, Debug)]
pub struct FieldRaster {
    pub grid: RasterGrid,
    pub cells: Vec<FieldCell>,
    /// Pixels whose search window held no sample.
    pub unresolved: usize,
}

impl FieldRaster {
    /// Size of the raster as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }

    /// Cell at the given pixel, or `None` if out of bounds.
    pub fn get(&self, ix: isize, iy: isize) -> Option<&FieldCell> {
        let (w, h) = self.size();
        if ix < 0 || iy < 0 || ix >= w as isize || iy >= h as isize {
            return None;
        }
        self.cells.get(iy as usize * w + ix as usize)
    }

    /// Cell at the pixel containing `p`, clamping to the raster edge.
    pub fn sample_domain(&self, p: Vec2) -> &FieldCell {
        let (w, h) = self.size();
        let (ix, iy) = self.grid.domain_to_pixel(p);
        let ix = ix.clamp(0, w as isize - 1) as usize;
        let iy = iy.clamp(0, h as isize - 1) as usize;
        &self.cells[iy * w + ix]
    }

    /// Iterates `(pixel position in domain, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &FieldCell)> + '_ {
        let w = self.grid.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.grid.pixel_to_domain(i % w, i / w), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(distance: f32) -> FieldCell {
        FieldCell {
            distance,
            nearest: Vec2::ZERO,
            reference_radius: 0.1,
        }
    }

    fn make_raster() -> FieldRaster {
        let grid = RasterGrid::try_new(2, 2, 1.0).unwrap();
        FieldRaster {
            grid,
            cells: vec![cell(0.0), cell(1.0), cell(2.0), cell(3.0)],
            unresolved: 0,
        }
    }

    #[test]
    fn try_new_rejects_empty_raster() {
        assert!(matches!(
            RasterGrid::try_new(0, 4, 1.0),
            Err(Error::InvalidRaster(_))
        ));
        assert!(RasterGrid::try_new(4, 4, -1.0).is_err());
    }

    #[test]
    fn try_new_rejects_overflowing_pixel_count() {
        assert!(matches!(
            RasterGrid::try_new(usize::MAX, 2, 1.0),
            Err(Error::InvalidRaster(_))
        ));
        let wide = RasterGrid::try_new(usize::MAX, 1, 1.0).unwrap();
        assert_eq!(wide.len(), usize::MAX);
    }

    #[test]
    fn pixel_centers_map_into_domain() {
        let grid = RasterGrid::try_new(4, 2, 2.0).unwrap();
        assert_eq!(grid.pixel_to_domain(0, 0), Vec2::new(0.25, 0.5));
        assert_eq!(grid.pixel_to_domain(3, 1), Vec2::new(1.75, 1.5));
        assert_eq!(grid.domain_to_pixel(Vec2::new(1.75, 1.5)), (3, 1));
    }

    #[test]
    fn get_returns_none_outside_bounds() {
        let raster = make_raster();
        assert!(raster.get(-1, 0).is_none());
        assert!(raster.get(2, 0).is_none());
        assert_eq!(raster.get(1, 1).map(|c| c.distance), Some(3.0));
    }

    #[test]
    fn sample_domain_clamps_to_edges() {
        let raster = make_raster();
        assert_eq!(raster.sample_domain(Vec2::new(0.75, 0.25)).distance, 1.0);
        assert_eq!(raster.sample_domain(Vec2::new(-3.0, 5.0)).distance, 2.0);
    }

    #[test]
    fn iter_visits_rows_in_order() {
        let raster = make_raster();
        let positions: Vec<Vec2> = raster.iter().map(|(p, _)| p).collect();
        assert_eq!(positions[1], Vec2::new(0.75, 0.25));
        assert_eq!(positions[2], Vec2::new(0.25, 0.75));
    }
}
