//! Errors raised while building a mode solver

use thiserror::Error;

use crate::mode::ModeFamily;

/// Errors that abort solver construction.
///
/// Invalid mode indices are not listed here: the validator corrects them in
/// place and reports an [`IndexCorrection`](crate::validate::IndexCorrection).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModeError {
    #[error(
        "{family}({m},{n}) does not propagate: ω = {omega:.4e} is below the cutoff ω_c = {cutoff_omega:.4e}"
    )]
    EvanescentMode {
        family: ModeFamily,
        m: u32,
        n: u32,
        omega: f64,
        cutoff_omega: f64,
    },

    #[error("Degenerate mode {family}({m},{n}): transverse wavenumber is zero")]
    DegenerateGeometry { family: ModeFamily, m: u32, n: u32 },

    #[error("Non-physical {name}: {value}")]
    NonPhysicalParameter { name: &'static str, value: f64 },
}

impl ModeError {
    /// True when the configuration is valid but the mode is below cutoff.
    pub fn is_evanescent(&self) -> bool {
        matches!(self, ModeError::EvanescentMode { .. })
    }
}
