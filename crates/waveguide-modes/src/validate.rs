//! Raw user input to validated mode configuration.
//!
//! Validation never fails: mode indices that break the family's minimum are
//! replaced by the base mode and reported through [`IndexCorrection`]. Errors
//! that depend on the physics (evanescent or degenerate modes) are left to
//! solver construction.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{GHZ_TO_SOLVER_FREQUENCY, VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY};
use crate::error::ModeError;
use crate::mode::{FieldKind, ModeFamily};
use crate::solver::{Solver, WaveguideGeometry};
use crate::LengthUnit;

/// Configuration as entered by the user, before any normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfiguration {
    pub family: ModeFamily,
    pub field_kind: FieldKind,
    /// Operating frequency (GHz)
    pub frequency_ghz: f64,
    /// Length of the guide cross-section (cm)
    pub length_cm: f64,
    /// Width of the guide cross-section (cm)
    pub width_cm: f64,
    /// Relative refractive index of the filling dielectric
    pub refractive_index: f64,
    /// Mode index m, truncated to an integer
    pub m: f64,
    /// Mode index n, truncated to an integer
    pub n: f64,
    /// Reference field amplitude
    pub amplitude: f64,
}

impl Default for RawConfiguration {
    fn default() -> Self {
        Self {
            family: ModeFamily::Tm,
            field_kind: FieldKind::Electric,
            frequency_ghz: 10.0,
            length_cm: 5.0,
            width_cm: 3.0,
            refractive_index: 6.0,
            m: 1.0,
            n: 1.0,
            amplitude: 1.0,
        }
    }
}

/// A validated configuration; `a ≥ b` and the mode indices are legal for
/// the family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeConfiguration {
    family: ModeFamily,
    field_kind: FieldKind,
    a: f64,
    b: f64,
    angular_frequency: f64,
    permittivity: f64,
    permeability: f64,
    m: u32,
    n: u32,
    amplitude: f64,
}

impl ModeConfiguration {
    pub fn family(&self) -> ModeFamily {
        self.family
    }

    pub fn field_kind(&self) -> FieldKind {
        self.field_kind
    }

    /// Broad side (m)
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Narrow side (m)
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    pub fn permittivity(&self) -> f64 {
        self.permittivity
    }

    pub fn permeability(&self) -> f64 {
        self.permeability
    }

    pub fn indices(&self) -> (u32, u32) {
        (self.m, self.n)
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Solver inputs for this configuration.
    pub fn geometry(&self) -> WaveguideGeometry {
        WaveguideGeometry::new(
            self.a,
            self.b,
            self.angular_frequency,
            self.permittivity,
            self.permeability,
            self.m,
            self.n,
        )
        .with_amplitude(self.amplitude)
    }

    /// Construct the solver for the configured family.
    pub fn build_solver(&self) -> Result<Solver, ModeError> {
        Solver::new(self.family, self.geometry())
    }

    /// Short label, e.g. `TE(1,0) electric field`.
    pub fn describe(&self) -> String {
        format!("{}({},{}) {} field", self.family, self.m, self.n, self.field_kind)
    }
}

/// Record of mode indices replaced by the family's base mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexCorrection {
    pub family: ModeFamily,
    /// Indices as supplied
    pub requested: (f64, f64),
    /// Indices substituted
    pub corrected: (u32, u32),
}

impl IndexCorrection {
    pub fn title(&self) -> String {
        format!("Wrong Set of Configuration for {} Mode", self.family)
    }

    /// Human-readable notice for the UI layer.
    pub fn notice(&self) -> String {
        let (m, n) = self.corrected;
        format!(
            "The Base Mode for {}({}) Mode is ({}, {}). Since the Mode parameters ({}, {}) are invalid, it is automatically set to ({}, {})",
            self.family.long_name(),
            self.family,
            m,
            n,
            self.requested.0,
            self.requested.1,
            m,
            n
        )
    }
}

/// Result of validating a [`RawConfiguration`]
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub config: ModeConfiguration,
    pub correction: Option<IndexCorrection>,
}

impl Validation {
    pub fn was_corrected(&self) -> bool {
        self.correction.is_some()
    }
}

/// Truncate toward zero like an integer cast; `None` for negative or
/// non-finite input.
fn coerce_index(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < 0.0 || truncated > u32::MAX as f64 {
        return None;
    }
    Some(truncated as u32)
}

/// Normalize raw input into a [`ModeConfiguration`].
///
/// cm become m, GHz become the solver's ω (×1e9, no 2π), the refractive
/// index becomes ε = ε₀·n², and the larger side is stored as `a`.
pub fn validate(raw: &RawConfiguration) -> Validation {
    let length = LengthUnit::Centimeter.to_meters(raw.length_cm);
    let width = LengthUnit::Centimeter.to_meters(raw.width_cm);
    let (a, b) = if width >= length { (width, length) } else { (length, width) };

    let indices = coerce_index(raw.m)
        .zip(coerce_index(raw.n))
        .filter(|&(m, n)| raw.family.accepts(m, n));

    let (m, n, amplitude, correction) = match indices {
        Some((m, n)) => (m, n, raw.amplitude, None),
        None => {
            let corrected = raw.family.base_mode();
            let correction = IndexCorrection {
                family: raw.family,
                requested: (raw.m, raw.n),
                corrected,
            };
            warn!("{}: {}", correction.title(), correction.notice());
            (corrected.0, corrected.1, 1.0, Some(correction))
        }
    };

    let config = ModeConfiguration {
        family: raw.family,
        field_kind: raw.field_kind,
        a,
        b,
        angular_frequency: raw.frequency_ghz * GHZ_TO_SOLVER_FREQUENCY,
        permittivity: VACUUM_PERMITTIVITY * raw.refractive_index * raw.refractive_index,
        permeability: VACUUM_PERMEABILITY,
        m,
        n,
        amplitude,
    };

    Validation { config, correction }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(family: ModeFamily, m: f64, n: f64) -> RawConfiguration {
        RawConfiguration {
            family,
            m,
            n,
            ..RawConfiguration::default()
        }
    }

    #[test]
    fn test_te_indices_corrected_to_base_mode() {
        let v = validate(&raw(ModeFamily::Te, 0.0, 5.0));
        assert!(v.was_corrected());
        assert_eq!(v.config.indices(), (1, 0));
        let correction = v.correction.unwrap();
        assert_eq!(correction.corrected, (1, 0));
        assert_eq!(correction.title(), "Wrong Set of Configuration for TE Mode");
        assert!(correction.notice().contains("Transverse Electric(TE) Mode is (1, 0)"));
    }

    #[test]
    fn test_tm_indices_corrected_to_base_mode() {
        let v = validate(&raw(ModeFamily::Tm, 0.0, 0.0));
        assert!(v.was_corrected());
        assert_eq!(v.config.indices(), (1, 1));
        assert!(v.correction.unwrap().notice().contains("(1, 1)"));
    }

    #[test]
    fn test_valid_indices_pass_through() {
        let v = validate(&raw(ModeFamily::Te, 2.0, 0.0));
        assert!(!v.was_corrected());
        assert_eq!(v.config.indices(), (2, 0));

        let v = validate(&raw(ModeFamily::Tm, 3.0, 2.0));
        assert_eq!(v.config.indices(), (3, 2));
    }

    #[test]
    fn test_indices_are_truncated() {
        let v = validate(&raw(ModeFamily::Tm, 2.9, 1.4));
        assert!(!v.was_corrected());
        assert_eq!(v.config.indices(), (2, 1));

        // 0.7 truncates to 0, which TM rejects
        let v = validate(&raw(ModeFamily::Tm, 0.7, 1.0));
        assert!(v.was_corrected());
    }

    #[test]
    fn test_negative_and_nan_indices_corrected() {
        assert!(validate(&raw(ModeFamily::Te, -2.0, 0.0)).was_corrected());
        assert!(validate(&raw(ModeFamily::Te, 1.0, f64::NAN)).was_corrected());
    }

    #[test]
    fn test_correction_resets_amplitude() {
        let mut input = raw(ModeFamily::Te, 0.0, 1.0);
        input.amplitude = 3.5;
        assert_eq!(validate(&input).config.amplitude(), 1.0);

        input.m = 1.0;
        assert_eq!(validate(&input).config.amplitude(), 3.5);
    }

    #[test]
    fn test_longer_side_becomes_a() {
        let input = RawConfiguration {
            length_cm: 3.0,
            width_cm: 5.0,
            ..RawConfiguration::default()
        };
        let config = validate(&input).config;
        assert!((config.a() - 0.05).abs() < 1e-15);
        assert!((config.b() - 0.03).abs() < 1e-15);
    }

    #[test]
    fn test_unit_conversions() {
        let config = validate(&RawConfiguration::default()).config;
        // ω is the GHz value times 1e9, without 2π
        assert_eq!(config.angular_frequency(), 10.0 * 1e9);
        assert!((config.permittivity() - 36.0 * VACUUM_PERMITTIVITY).abs() < 1e-24);
        assert_eq!(config.permeability(), VACUUM_PERMEABILITY);
    }

    #[test]
    fn test_default_configuration_propagates() {
        let config = validate(&RawConfiguration::default()).config;
        let solver = config.build_solver().unwrap();
        assert!(crate::solver::ModeSolver::propagation_constant(&solver) > 0.0);
        assert_eq!(config.describe(), "TM(1,1) electric field");
    }

    #[test]
    fn test_raw_configuration_from_json() {
        let json = r#"{
            "family": "TE Mode",
            "field_kind": "Magnetic Field",
            "frequency_ghz": 12.0,
            "length_cm": 2.0,
            "width_cm": 4.0,
            "m": 1,
            "n": 0
        }"#;
        let input: RawConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(input.family, ModeFamily::Te);
        assert_eq!(input.field_kind, FieldKind::Magnetic);
        assert_eq!(input.refractive_index, 6.0);
        assert_eq!(input.amplitude, 1.0);
    }
}
