//! Sampling strategies for generating blue-noise positions in a square domain.
//!
//! The grid-accelerated frontier sampler lives in [`poisson_disk`]; [`PositionSampling`] is
//! the one-shot batch interface on top of it.
use mint::Vector2;
use rand::RngCore;

pub mod poisson_disk;

pub use poisson_disk::{PoissonDiskSampling, PoissonSampler, SamplerState, SamplingOutcome};

/// Trait for position sampling over `[0, domain_extent)²`.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: f32, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
///
/// Uses the upper 24 bits so the result is exactly representable and never rounds up to 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
    (rng.next_u32() >> 8) as f32 * SCALE
}
