//! waveguide-modes: closed-form TE/TM fields of a rectangular waveguide
//!
//! This crate provides:
//! - Validation of raw user input (units, side ordering, mode indices)
//! - TE and TM mode solvers exposing the six field components
//! - Parallel sampling of a field triad over a 3-D grid
//! - Python plot script generation for the sampled vector field
//!
//! The guide is hollow, lossless and filled with a non-magnetic dielectric.
//! Fields are normalized to a unit reference amplitude unless one is given.

pub mod constants;
pub mod error;
pub mod export;
pub mod mode;
pub mod sampling;
pub mod session;
pub mod solver;
pub mod validate;

pub use error::ModeError;
pub use export::generate_plot_script;
pub use mode::{Component, FieldKind, ModeFamily};
pub use sampling::{sample_field, FieldSamples, SampleGrid};
pub use session::{ConfiguredMode, Session};
pub use solver::{ModeSolver, Solver, TeSolver, TmSolver, WaveguideGeometry};
pub use validate::{validate, IndexCorrection, ModeConfiguration, RawConfiguration, Validation};

use anyhow::{Context, Result};

/// Validate raw input and build the matching solver.
pub fn configure(raw: &RawConfiguration) -> Result<ConfiguredMode, ModeError> {
    let Validation { config, correction } = validate(raw);
    let solver = config.build_solver()?;
    Ok(ConfiguredMode {
        config,
        solver,
        correction,
    })
}

/// Main entry point: parse a JSON configuration and return the sampled
/// field on the default grid as JSON.
pub fn sample_json(json: &str) -> Result<String> {
    let raw: RawConfiguration = serde_json::from_str(json).context("Invalid configuration JSON")?;
    let mode = configure(&raw)?;
    let grid = SampleGrid::for_configuration(&mode.config);
    let samples = sample_field(&mode.solver, mode.config.field_kind(), &grid, constants::DEFAULT_SAMPLE_TIME);
    Ok(samples.to_json()?)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthUnit {
    Meter,
    Centimeter,
}

impl LengthUnit {
    /// Convert from this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Meter => value,
            LengthUnit::Centimeter => value / 1e2,
        }
    }

    /// Convert from meters to this unit
    pub fn from_meters(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Meter => value,
            LengthUnit::Centimeter => value * 1e2,
        }
    }

    /// Get scale factor to convert from one unit to another
    pub fn scale_to(&self, target: &LengthUnit) -> f64 {
        target.from_meters(self.to_meters(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(LengthUnit::Centimeter.to_meters(5.0), 0.05);
        assert!((LengthUnit::Centimeter.from_meters(0.03) - 3.0).abs() < 1e-12);
        assert!((LengthUnit::Meter.scale_to(&LengthUnit::Centimeter) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_configure_reports_evanescent_mode() {
        let raw = RawConfiguration {
            frequency_ghz: 1.0,
            refractive_index: 1.0,
            ..RawConfiguration::default()
        };
        let err = configure(&raw).unwrap_err();
        assert!(err.is_evanescent());
    }

    #[test]
    fn test_sample_json_default() {
        let json = sample_json("{}").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["family"], "TM");
        assert_eq!(value["positions"].as_array().unwrap().len(), 25 * 25 * 20);
    }
}
