//! Spatial storage shared by the sampler and the distance field.
//!
//! This module defines [`SpatialGrid`], a uniform bucket grid holding at most one sample
//! index per cell, and [`SampleBuffer`], the fixed-capacity sample arena with its frontier
//! cursors. Both are owned by [`crate::simulation::Simulation`] and written together.
pub mod buffer;
pub mod spatial;

pub use buffer::SampleBuffer;
pub use spatial::{CellCoord, SpatialGrid};
