#![forbid(unsafe_code)]
//! poisson_field: Grid-accelerated Poisson disk sampling with a nearest-sample distance field.
//!
//! Modules:
//! - grid: uniform bucket grid and fixed-capacity sample buffer
//! - query: bounded 5×5 window nearest sample lookup
//! - sampling: frontier-expansion Poisson disk sampler and batch strategy
//! - simulation: session object owning one sampling run
//! - field: per-location signed distance to the nearest sample's disk
//! - render: shading contract for field consumers
//! - events: sinks for observing runs
pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod grid;
pub mod query;
pub mod render;
pub mod sampling;
pub mod simulation;

/// Convenient re-exports for common types. Import with `use poisson_field::prelude::*;`.
pub mod prelude {
    pub use crate::config::SamplerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, SamplingEvent, SamplingEventKind, VecSink};
    pub use crate::field::{DistanceField, FieldCell, FieldRaster, RasterGrid};
    pub use crate::grid::{CellCoord, SampleBuffer, SpatialGrid};
    pub use crate::query::{nearest, NearestHit, NO_SAMPLE_DISTANCE};
    pub use crate::render::{render, FieldShader};
    pub use crate::sampling::{
        PoissonDiskSampling, PoissonSampler, PositionSampling, SamplerState, SamplingOutcome,
    };
    pub use crate::simulation::Simulation;
}
