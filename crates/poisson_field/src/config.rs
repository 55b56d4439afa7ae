//! Sampler configuration and derived packing quantities.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of candidate trials drawn around each frontier sample.
pub const DEFAULT_MAX_TRIALS: usize = 100;

/// Default tolerance subtracted from the radius when rejecting candidates.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Configuration for a Poisson disk sampling run.
///
/// The domain is the square `[0, domain_extent)²`, split into
/// `grid_resolution × grid_resolution` cells. The packing radius is derived from
/// the cell size so that every cell holds at most one sample.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Number of grid cells along each axis.
    pub grid_resolution: usize,
    /// Maximum number of samples accepted in one run.
    pub capacity: usize,
    /// Side length of the square sampling domain.
    pub domain_extent: f32,
    /// Candidate trials per frontier sample.
    pub max_trials: usize,
    /// Numerical slack applied to the exclusion radius.
    pub epsilon: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 20,
            capacity: 1000,
            domain_extent: 1.0,
            max_trials: DEFAULT_MAX_TRIALS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SamplerConfig {
    /// Creates a new [`SamplerConfig`] over the unit square.
    pub fn new(grid_resolution: usize, capacity: usize) -> Self {
        Self {
            grid_resolution,
            capacity,
            ..Default::default()
        }
    }

    /// Sets the domain extent.
    pub fn with_domain_extent(mut self, domain_extent: f32) -> Self {
        self.domain_extent = domain_extent;
        self
    }

    /// Sets the number of trials per frontier sample.
    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Sets the rejection tolerance.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Edge length of one grid cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.domain_extent / self.grid_resolution as f32
    }

    /// Minimum separation between accepted samples (the cell diagonal).
    #[inline]
    pub fn radius(&self) -> f32 {
        self.cell_size() * std::f32::consts::SQRT_2
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(Error::InvalidConfig("grid_resolution must be > 0".into()));
        }
        if self
            .grid_resolution
            .checked_mul(self.grid_resolution)
            .is_none()
        {
            return Err(Error::InvalidConfig(
                "grid_resolution is too large for a cell array".into(),
            ));
        }
        if self.capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be > 0".into()));
        }
        if !self.domain_extent.is_finite() || self.domain_extent <= 0.0 {
            return Err(Error::InvalidConfig(
                "domain_extent must be finite and > 0".into(),
            ));
        }
        if self.max_trials == 0 {
            return Err(Error::InvalidConfig("max_trials must be > 0".into()));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidConfig(
                "epsilon must be finite and >= 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_setup() {
        let config = SamplerConfig::default();
        assert_eq!(config.grid_resolution, 20);
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.max_trials, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn radius_is_cell_diagonal() {
        let config = SamplerConfig::new(20, 1000);
        let expected = (1.0 / 20.0) * 2.0_f32.sqrt();
        assert!((config.radius() - expected).abs() < 1e-7);
        assert!((config.cell_size() - 0.05).abs() < 1e-7);
    }

    #[test]
    fn extent_scales_cell_size() {
        let config = SamplerConfig::new(10, 5).with_domain_extent(4.0);
        assert!((config.cell_size() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        assert!(SamplerConfig::new(0, 10).validate().is_err());
        assert!(SamplerConfig::new(10, 0).validate().is_err());
        assert!(SamplerConfig::new(10, 10)
            .with_domain_extent(0.0)
            .validate()
            .is_err());
        assert!(SamplerConfig::new(10, 10)
            .with_domain_extent(f32::NAN)
            .validate()
            .is_err());
        assert!(SamplerConfig::new(10, 10)
            .with_max_trials(0)
            .validate()
            .is_err());
        assert!(SamplerConfig::new(10, 10)
            .with_epsilon(-1.0)
            .validate()
            .is_err());
    }
}
