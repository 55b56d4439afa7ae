//! Grid-accelerated Poisson disk sampling by frontier expansion.
//!
//! Starting from a single origin, each frontier sample throws a fixed number of darts into
//! the annulus `[radius, 2 * radius)` around itself. A dart is kept when it lies inside the
//! domain and no earlier sample within the 5×5 cell window is closer than the radius.
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::config::SamplerConfig;
use crate::error::{Error, Result};
use crate::events::{EventSink, SamplingEvent, SamplingEventKind};
use crate::grid::{SampleBuffer, SpatialGrid};
use crate::query::nearest;
use crate::sampling::{rand01, PositionSampling};
use crate::simulation::Simulation;

/// Lifecycle of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SamplerState {
    /// The origin has been placed; nothing expanded yet.
    Seeded,
    /// Frontier samples remain to be expanded.
    Expanding,
    /// Every accepted sample was expanded.
    Exhausted,
    /// The sample buffer is full.
    CapacityReached,
}

impl SamplerState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SamplerState::Exhausted | SamplerState::CapacityReached)
    }
}

/// Summary of a sampling run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingOutcome {
    /// State the sampler stopped in.
    pub state: SamplerState,
    /// Number of accepted samples, including the origin.
    pub accepted: usize,
    /// Candidate darts drawn.
    pub trials: usize,
    /// Candidates that fell outside the domain.
    pub rejected_out_of_domain: usize,
    /// Candidates that were too close to an existing sample or landed in an occupied cell.
    pub rejected_too_close: usize,
}

/// Reason a candidate dart was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    OutOfDomain,
    /// Closer than `radius - epsilon` to an accepted sample.
    TooClose,
    /// Its cell already holds a sample.
    CellOccupied,
}

/// Returns true when `p` lies in `[0, extent)²`. NaN coordinates are outside.
#[inline]
pub(crate) fn in_domain(p: Vec2, extent: f32) -> bool {
    p.x >= 0.0 && p.x < extent && p.y >= 0.0 && p.y < extent
}

/// Frontier-expansion sampler writing into a borrowed grid and sample buffer.
///
/// The sampler is the only writer for the duration of a run; each accepted candidate is
/// appended to the buffer and inserted into the grid before the next dart is drawn.
pub struct PoissonSampler<'a> {
    grid: &'a mut SpatialGrid,
    samples: &'a mut SampleBuffer,
    origin: Vec2,
    extent: f32,
    radius: f32,
    threshold: f32,
    max_trials: usize,
    state: SamplerState,
    trials: usize,
    rejected_out_of_domain: usize,
    rejected_too_close: usize,
}

impl<'a> PoissonSampler<'a> {
    /// Resets `grid` and `samples` and places `origin` as sample 0.
    ///
    /// Fails without touching either structure or emitting events when `config` is invalid,
    /// when `grid` or `samples` were built for a different configuration, or when `origin`
    /// is outside the domain.
    pub fn seed(
        config: &SamplerConfig,
        grid: &'a mut SpatialGrid,
        samples: &'a mut SampleBuffer,
        origin: Vec2,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        config.validate()?;
        if grid.resolution() != config.grid_resolution
            || grid.domain_extent() != config.domain_extent
        {
            return Err(Error::InvalidConfig(format!(
                "grid is {0}x{0} over extent {1}, configuration expects {2}x{2} over extent {3}",
                grid.resolution(),
                grid.domain_extent(),
                config.grid_resolution,
                config.domain_extent
            )));
        }
        if samples.capacity() != config.capacity {
            return Err(Error::InvalidConfig(format!(
                "sample buffer holds {} samples, configuration expects {}",
                samples.capacity(),
                config.capacity
            )));
        }
        if !in_domain(origin, config.domain_extent) {
            return Err(Error::OriginOutOfDomain {
                x: origin.x,
                y: origin.y,
            });
        }

        if sink.wants(SamplingEventKind::RunStarted) {
            sink.send(SamplingEvent::RunStarted {
                config: config.clone(),
                origin,
            });
        }

        grid.reset();
        samples.clear();

        let mut sampler = Self {
            grid,
            samples,
            origin,
            extent: config.domain_extent,
            radius: config.radius(),
            threshold: config.radius() - config.epsilon,
            max_trials: config.max_trials,
            state: SamplerState::Seeded,
            trials: 0,
            rejected_out_of_domain: 0,
            rejected_too_close: 0,
        };
        sampler.accept(origin, None, sink);

        if sampler.samples.is_full() {
            sampler.samples.drain_frontier();
            sampler.state = SamplerState::CapacityReached;
        }

        Ok(sampler)
    }

    #[inline]
    pub fn state(&self) -> SamplerState {
        self.state
    }

    #[inline]
    pub fn samples(&self) -> &SampleBuffer {
        &*self.samples
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &*self.grid
    }

    pub fn outcome(&self) -> SamplingOutcome {
        SamplingOutcome {
            state: self.state,
            accepted: self.samples.tail(),
            trials: self.trials,
            rejected_out_of_domain: self.rejected_out_of_domain,
            rejected_too_close: self.rejected_too_close,
        }
    }

    /// Checks `candidate` against the domain, the exclusion radius and the grid.
    fn rejection(&self, candidate: Vec2) -> Option<Rejection> {
        if !in_domain(candidate, self.extent) {
            return Some(Rejection::OutOfDomain);
        }
        let hit = nearest(candidate, &*self.grid, &*self.samples, self.origin);
        if hit.distance < self.threshold {
            return Some(Rejection::TooClose);
        }
        if self.grid.get(self.grid.cell_of(candidate)).is_some() {
            return Some(Rejection::CellOccupied);
        }
        None
    }

    fn accept(&mut self, p: Vec2, source: Option<usize>, sink: &mut dyn EventSink) -> bool {
        let cell = self.grid.cell_of(p);
        let Some(index) = self.samples.push(p) else {
            return false;
        };
        self.grid.insert(index, cell);
        trace!(index, x = p.x, y = p.y, "accepted sample");

        if sink.wants(SamplingEventKind::SampleAccepted) {
            sink.send(SamplingEvent::SampleAccepted {
                index,
                position: p,
                source,
            });
        }
        true
    }

    /// Expands the next frontier sample and returns the resulting state.
    ///
    /// Every trial is drawn even after an acceptance, so one source may add several
    /// samples. Trials stop early only when the buffer fills up.
    pub fn step(&mut self, rng: &mut dyn RngCore, sink: &mut dyn EventSink) -> SamplerState {
        if self.state.is_terminal() {
            return self.state;
        }

        let source_index = self.samples.head();
        let Some(source) = self.samples.pop_frontier() else {
            self.state = SamplerState::Exhausted;
            return self.state;
        };
        self.state = SamplerState::Expanding;

        for _ in 0..self.max_trials {
            if self.samples.is_full() {
                break;
            }
            self.trials += 1;

            let theta = rand01(rng) * TAU;
            let offset = (1.0 + rand01(rng)) * self.radius;
            let candidate = source + Vec2::new(theta.cos(), theta.sin()) * offset;

            match self.rejection(candidate) {
                Some(Rejection::OutOfDomain) => self.rejected_out_of_domain += 1,
                Some(Rejection::TooClose | Rejection::CellOccupied) => {
                    self.rejected_too_close += 1
                }
                None => {
                    self.accept(candidate, Some(source_index), sink);
                }
            }
        }

        self.state = if self.samples.is_full() {
            self.samples.drain_frontier();
            SamplerState::CapacityReached
        } else if self.samples.has_frontier() {
            SamplerState::Expanding
        } else {
            SamplerState::Exhausted
        };
        self.state
    }

    /// Expands frontier samples until a terminal state is reached.
    pub fn run(mut self, rng: &mut dyn RngCore, sink: &mut dyn EventSink) -> SamplingOutcome {
        while !self.state.is_terminal() {
            self.step(rng, sink);
        }

        let outcome = self.outcome();
        match outcome.state {
            SamplerState::CapacityReached => warn!(
                capacity = self.samples.capacity(),
                trials = outcome.trials,
                "sampling stopped at capacity"
            ),
            _ => info!(
                accepted = outcome.accepted,
                trials = outcome.trials,
                "sampling frontier exhausted"
            ),
        }

        if sink.wants(SamplingEventKind::RunFinished) {
            sink.send(SamplingEvent::RunFinished { outcome });
        }
        outcome
    }
}

/// One-shot Poisson disk sampling strategy.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling {
    /// Grid cells per axis; the packing radius is the cell diagonal.
    pub grid_resolution: usize,
    /// Maximum number of samples.
    pub capacity: usize,
    /// Seed position; a random one is drawn when `None`.
    pub origin: Option<Vec2>,
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with a random origin.
    pub fn new(grid_resolution: usize, capacity: usize) -> Self {
        Self {
            grid_resolution,
            capacity,
            origin: None,
        }
    }

    /// Sets a fixed origin.
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: f32, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let config =
            SamplerConfig::new(self.grid_resolution, self.capacity).with_domain_extent(domain_extent);
        let Ok(mut simulation) = Simulation::try_new(config) else {
            return Vec::new();
        };

        let origin = self.origin.unwrap_or_else(|| {
            let x = rand01(rng) * domain_extent;
            let y = rand01(rng) * domain_extent;
            Vec2::new(x, y)
        });
        if simulation.run(origin, rng).is_err() {
            return Vec::new();
        }

        simulation.positions().iter().copied().map(Into::into).collect()
    }
}
