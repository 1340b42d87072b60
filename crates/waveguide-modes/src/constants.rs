//! Physical constants and sampling defaults

// ============================================================================
// Vacuum properties
// ============================================================================

/// Vacuum permittivity ε₀ (F/m)
pub const VACUUM_PERMITTIVITY: f64 = 8.85418782e-12;

/// Vacuum permeability μ₀ (H/m)
pub const VACUUM_PERMEABILITY: f64 = 1.25663706e-6;

// ============================================================================
// Unit conversion
// ============================================================================

/// Multiplier from the GHz input to the solver's ω.
///
/// Applied without a 2π factor, so the stored ω equals the numeric value of
/// the frequency in Hz.
pub const GHZ_TO_SOLVER_FREQUENCY: f64 = 1e9;

// ============================================================================
// Sampling defaults
// ============================================================================

/// Grid points across the broad wall (x)
pub const DEFAULT_GRID_NX: usize = 25;

/// Grid points across the narrow wall (y)
pub const DEFAULT_GRID_NY: usize = 25;

/// Grid points along the guide axis (z)
pub const DEFAULT_GRID_NZ: usize = 20;

/// Length of the sampled guide section (m)
pub const DEFAULT_SECTION_LENGTH: f64 = 0.05;

/// Instant at which the field snapshot is taken (s)
pub const DEFAULT_SAMPLE_TIME: f64 = 1.0;

/// Below this, a transverse wavenumber is treated as zero
pub const DEGENERATE_WAVENUMBER: f64 = 1e-12;
