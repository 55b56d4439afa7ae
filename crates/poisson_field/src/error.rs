//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid sampler configuration, origins outside the sampling domain, and invalid
//! field raster requests. Running out of frontier or capacity is never an error.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("origin ({x}, {y}) lies outside the sampling domain")]
    OriginOutOfDomain { x: f32, y: f32 },

    #[error("invalid field raster: {0}")]
    InvalidRaster(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_error_reports_coordinates() {
        let err = Error::OriginOutOfDomain { x: 1.5, y: -0.25 };
        assert_eq!(
            err.to_string(),
            "origin (1.5, -0.25) lies outside the sampling domain"
        );
    }

    #[test]
    fn invalid_config_wraps_message() {
        let err = Error::InvalidConfig("grid_resolution must be > 0".into());
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("grid_resolution")));
    }
}
