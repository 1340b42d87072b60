//! Transverse-magnetic solver: E_z is the primary field, H_z = 0

use tracing::debug;

use super::{ModeScalars, ModeSolver, WaveguideGeometry};
use crate::error::ModeError;
use crate::mode::ModeFamily;

/// TM_mn field solver with reference amplitude E₀
#[derive(Debug, Clone, PartialEq)]
pub struct TmSolver {
    geometry: WaveguideGeometry,
    scalars: ModeScalars,
    cutoff_frequency: f64,
}

impl TmSolver {
    pub fn new(geometry: WaveguideGeometry) -> Result<Self, ModeError> {
        let scalars = ModeScalars::derive(&geometry, ModeFamily::Tm)?;
        let cutoff_frequency = geometry.cutoff_coefficient()
            * ((1.0 / geometry.a()).powi(2) + (1.0 / geometry.b()).powi(2)).sqrt();

        debug!(
            m = geometry.m(),
            n = geometry.n(),
            h = scalars.h,
            gamma = scalars.gamma,
            cutoff_frequency,
            "TM solver ready"
        );

        Ok(Self {
            geometry,
            scalars,
            cutoff_frequency,
        })
    }

    /// Replace every input and derived scalar. On error `self` is untouched.
    pub fn reconfigure(&mut self, geometry: WaveguideGeometry) -> Result<(), ModeError> {
        *self = Self::new(geometry)?;
        Ok(())
    }

    fn h_squared(&self) -> f64 {
        self.scalars.h * self.scalars.h
    }
}

impl ModeSolver for TmSolver {
    fn family(&self) -> ModeFamily {
        ModeFamily::Tm
    }

    fn geometry(&self) -> &WaveguideGeometry {
        &self.geometry
    }

    fn transverse_wavenumber(&self) -> f64 {
        self.scalars.h
    }

    fn propagation_constant(&self) -> f64 {
        self.scalars.gamma
    }

    fn cutoff_frequency(&self) -> f64 {
        self.cutoff_frequency
    }

    fn ez(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        self.geometry.amplitude() * phase.cos() * (s.kx * x).sin() * (s.ky * y).sin()
    }

    fn hz(&self, _x: f64, _y: f64, _z: f64, _t: f64) -> f64 {
        0.0
    }

    fn ex(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        let coeff = -s.gamma / self.h_squared() * s.kx * self.geometry.amplitude();
        coeff * phase.sin() * (s.kx * x).cos() * (s.ky * y).sin()
    }

    fn ey(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        let coeff = -s.gamma / self.h_squared() * s.ky * self.geometry.amplitude();
        coeff * phase.sin() * (s.kx * x).sin() * (s.ky * y).cos()
    }

    fn hx(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        let omega_mu = self.geometry.omega() * self.geometry.permeability();
        let coeff = omega_mu / self.h_squared() * s.ky * self.geometry.amplitude();
        coeff * phase.sin() * (s.kx * x).sin() * (s.ky * y).cos()
    }

    fn hy(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        let omega_mu = self.geometry.omega() * self.geometry.permeability();
        let coeff = omega_mu / self.h_squared() * s.kx * self.geometry.amplitude();
        coeff * phase.sin() * (s.kx * x).cos() * (s.ky * y).sin()
    }
}
