//! Session object owning the grid and sample buffer of a sampling run.
use glam::Vec2;
use rand::RngCore;

use crate::config::SamplerConfig;
use crate::error::Result;
use crate::events::EventSink;
use crate::field::DistanceField;
use crate::grid::{SampleBuffer, SpatialGrid};
use crate::sampling::{PoissonSampler, SamplingOutcome};

/// Owns the spatial grid and sample buffer for one configuration.
///
/// Each call to [`Simulation::run`] resets both structures and samples again from the
/// given origin. Between runs the samples are read-only and can back a [`DistanceField`].
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SamplerConfig,
    grid: SpatialGrid,
    samples: SampleBuffer,
    origin: Vec2,
    outcome: Option<SamplingOutcome>,
}

impl Simulation {
    /// Validates `config` and preallocates the grid and sample buffer.
    pub fn try_new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: SpatialGrid::try_new(config.grid_resolution, config.domain_extent)?,
            samples: SampleBuffer::try_with_capacity(config.capacity)?,
            origin: Vec2::splat(config.domain_extent * 0.5),
            outcome: None,
            config,
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    /// Accepted sample positions in insertion order.
    pub fn positions(&self) -> &[Vec2] {
        self.samples.as_slice()
    }

    /// Origin of the last run, or the domain center before the first one.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Outcome of the last completed run.
    pub fn outcome(&self) -> Option<SamplingOutcome> {
        self.outcome
    }

    /// Clears all samples and grid cells.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.samples.clear();
        self.outcome = None;
    }

    /// Samples the domain starting from `origin`.
    pub fn run(&mut self, origin: Vec2, rng: &mut dyn RngCore) -> Result<SamplingOutcome> {
        self.run_with_events(origin, rng, &mut ())
    }

    /// Samples the domain starting from `origin`, reporting progress to `sink`.
    ///
    /// An origin outside the domain is rejected before the grid or buffer are touched.
    pub fn run_with_events(
        &mut self,
        origin: Vec2,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<SamplingOutcome> {
        let sampler =
            PoissonSampler::seed(&self.config, &mut self.grid, &mut self.samples, origin, sink)?;
        let outcome = sampler.run(rng, sink);
        self.origin = origin;
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// Read-only distance field over the current samples.
    pub fn field(&self) -> DistanceField<'_> {
        DistanceField::new(
            &self.grid,
            &self.samples,
            self.config.radius(),
            self.config.domain_extent,
            self.origin,
        )
    }
}
