//! Nearest-sample distance field over a finished sample set.
//!
//! For each query point the field reports the distance to the edge of a disk of half the
//! packing radius around the nearest sample: negative inside the disk, zero on its
//! boundary and positive outside. Lookups reuse [`crate::query::nearest`], so a point with
//! no sample inside its 5×5 cell window measures against the run's origin instead.
//!
//! Raster passes are data-parallel over rows when the `parallel` feature is enabled.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::events::{EventSink, SamplingEvent, SamplingEventKind};
use crate::grid::{SampleBuffer, SpatialGrid};
use crate::query::nearest;

pub mod raster;

pub use raster::{FieldRaster, RasterGrid};

/// Field value at one query location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldCell {
    /// Signed distance to the nearest sample's disk.
    pub distance: f32,
    /// Position of the nearest sample.
    pub nearest: Vec2,
    /// Radius of the disk painted around each sample.
    pub reference_radius: f32,
}

/// Read-only view of a sample set for field queries.
#[derive(Debug, Clone, Copy)]
pub struct DistanceField<'a> {
    grid: &'a SpatialGrid,
    samples: &'a SampleBuffer,
    disk_radius: f32,
    domain_extent: f32,
    fallback: Vec2,
}

impl<'a> DistanceField<'a> {
    /// Creates a field from a packing `radius`; disks use half of it.
    pub fn new(
        grid: &'a SpatialGrid,
        samples: &'a SampleBuffer,
        radius: f32,
        domain_extent: f32,
        fallback: Vec2,
    ) -> Self {
        Self {
            grid,
            samples,
            disk_radius: radius * 0.5,
            domain_extent,
            fallback,
        }
    }

    /// Radius of the disk around each sample.
    #[inline]
    pub fn disk_radius(&self) -> f32 {
        self.disk_radius
    }

    #[inline]
    fn lookup(&self, p: Vec2) -> (FieldCell, bool) {
        let hit = nearest(p, self.grid, self.samples, self.fallback);
        let cell = FieldCell {
            distance: (p - hit.position).length() - self.disk_radius,
            nearest: hit.position,
            reference_radius: self.disk_radius,
        };
        (cell, hit.is_found())
    }

    /// Evaluates the field at a single domain position.
    pub fn evaluate_at(&self, p: Vec2) -> FieldCell {
        self.lookup(p).0
    }

    fn fill_row(&self, grid: &RasterGrid, iy: usize, row: &mut [FieldCell]) -> usize {
        let mut unresolved = 0;
        for (ix, out) in row.iter_mut().enumerate() {
            let (cell, found) = self.lookup(grid.pixel_to_domain(ix, iy));
            *out = cell;
            if !found {
                unresolved += 1;
            }
        }
        unresolved
    }

    fn blank(&self, grid: RasterGrid) -> FieldRaster {
        let placeholder = FieldCell {
            distance: 0.0,
            nearest: self.fallback,
            reference_radius: self.disk_radius,
        };
        FieldRaster {
            cells: vec![placeholder; grid.len()],
            grid,
            unresolved: 0,
        }
    }

    /// Evaluates a `width × height` raster, one query per pixel center.
    pub fn evaluate(&self, width: usize, height: usize) -> Result<FieldRaster> {
        self.evaluate_with_events(width, height, &mut ())
    }

    /// Like [`DistanceField::evaluate`], reporting completion to `sink`.
    pub fn evaluate_with_events(
        &self,
        width: usize,
        height: usize,
        sink: &mut dyn EventSink,
    ) -> Result<FieldRaster> {
        let grid = RasterGrid::try_new(width, height, self.domain_extent)?;
        let mut raster = self.blank(grid);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let grid = &raster.grid;
            raster.unresolved = raster
                .cells
                .par_chunks_mut(width)
                .enumerate()
                .map(|(iy, row)| self.fill_row(grid, iy, row))
                .sum();
        }
        #[cfg(not(feature = "parallel"))]
        {
            let grid = &raster.grid;
            raster.unresolved = raster
                .cells
                .chunks_mut(width)
                .enumerate()
                .map(|(iy, row)| self.fill_row(grid, iy, row))
                .sum();
        }

        self.finish(raster, sink)
    }

    /// Evaluates a raster on the calling thread only.
    pub fn evaluate_sequential(&self, width: usize, height: usize) -> Result<FieldRaster> {
        let grid = RasterGrid::try_new(width, height, self.domain_extent)?;
        let mut raster = self.blank(grid);
        let grid = &raster.grid;
        raster.unresolved = raster
            .cells
            .chunks_mut(width)
            .enumerate()
            .map(|(iy, row)| self.fill_row(grid, iy, row))
            .sum();
        self.finish(raster, &mut ())
    }

    fn finish(&self, raster: FieldRaster, sink: &mut dyn EventSink) -> Result<FieldRaster> {
        let (width, height) = raster.size();
        debug!(
            width,
            height,
            unresolved = raster.unresolved,
            "distance field evaluated"
        );
        if sink.wants(SamplingEventKind::FieldEvaluated) {
            sink.send(SamplingEvent::FieldEvaluated {
                width,
                height,
                unresolved: raster.unresolved,
            });
        }
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::SamplerConfig;
    use crate::events::VecSink;
    use crate::simulation::Simulation;

    fn sampled(seed: u64) -> Simulation {
        let mut sim = Simulation::try_new(SamplerConfig::new(20, 1000)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        sim.run(Vec2::new(0.5, 0.5), &mut rng).unwrap();
        sim
    }

    #[test]
    fn field_at_sample_is_negative_half_radius() {
        let sim = sampled(17);
        let field = sim.field();
        let half = sim.config().radius() / 2.0;

        for &p in sim.positions() {
            let cell = field.evaluate_at(p);
            assert!((cell.distance + half).abs() < 1e-6);
            assert_eq!(cell.nearest, p);
            assert_eq!(cell.reference_radius, half);
        }
    }

    #[test]
    fn field_is_zero_on_disk_boundary() {
        let sim = sampled(5);
        let field = sim.field();
        let p = sim.positions()[0];
        let edge = p + Vec2::new(field.disk_radius(), 0.0);
        let cell = field.evaluate_at(edge);
        assert_eq!(cell.nearest, p);
        assert!(cell.distance.abs() < 1e-6);
    }

    #[test]
    fn empty_sample_set_measures_from_fallback() {
        let sim = Simulation::try_new(SamplerConfig::new(10, 10)).unwrap();
        let field = sim.field();
        let cell = field.evaluate_at(Vec2::new(0.1, 0.1));
        assert_eq!(cell.nearest, Vec2::new(0.5, 0.5));
        let expected = (Vec2::new(0.1, 0.1) - Vec2::new(0.5, 0.5)).length() - field.disk_radius();
        assert!((cell.distance - expected).abs() < 1e-6);
    }

    #[test]
    fn raster_matches_point_queries() {
        let sim = sampled(3);
        let field = sim.field();
        let raster = field.evaluate(32, 24).unwrap();

        assert_eq!(raster.size(), (32, 24));
        assert_eq!(raster.cells.len(), 32 * 24);
        for (p, cell) in raster.iter() {
            assert_eq!(*cell, field.evaluate_at(p));
        }
    }

    #[test]
    fn parallel_and_sequential_passes_agree() {
        let sim = sampled(44);
        let field = sim.field();
        let a = field.evaluate(64, 64).unwrap();
        let b = field.evaluate_sequential(64, 64).unwrap();
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.unresolved, b.unresolved);
    }

    #[test]
    fn zero_sized_raster_is_rejected() {
        let sim = sampled(1);
        assert!(sim.field().evaluate(0, 10).is_err());
    }

    #[test]
    fn evaluation_emits_summary_event() {
        let sim = sampled(12);
        let mut sink = VecSink::new();
        sim.field().evaluate_with_events(16, 16, &mut sink).unwrap();

        let events = sink.into_inner();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SamplingEvent::FieldEvaluated {
                width: 16,
                height: 16,
                ..
            }
        ));
    }
}
