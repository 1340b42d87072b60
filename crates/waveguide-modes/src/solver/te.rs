//! Transverse-electric solver: H_z is the primary field, E_z = 0

use tracing::debug;

use super::{ModeScalars, ModeSolver, WaveguideGeometry};
use crate::error::ModeError;
use crate::mode::ModeFamily;

/// TE_mn field solver with reference amplitude H₀
#[derive(Debug, Clone, PartialEq)]
pub struct TeSolver {
    geometry: WaveguideGeometry,
    scalars: ModeScalars,
    cutoff_frequency: f64,
}

impl TeSolver {
    pub fn new(geometry: WaveguideGeometry) -> Result<Self, ModeError> {
        let scalars = ModeScalars::derive(&geometry, ModeFamily::Te)?;
        // Dominant TE10 cutoff; ignores b and n
        let cutoff_frequency = geometry.cutoff_coefficient() / geometry.a();

        debug!(
            m = geometry.m(),
            n = geometry.n(),
            h = scalars.h,
            gamma = scalars.gamma,
            cutoff_frequency,
            "TE solver ready"
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

    /// (γ/h²)·H₀
    fn transverse_h_scale(&self) -> f64 {
        self.scalars.gamma / (self.scalars.h * self.scalars.h) * self.geometry.amplitude()
    }

    /// (ωμ/h²)·H₀
    fn transverse_e_scale(&self) -> f64 {
        self.geometry.omega() * self.geometry.permeability() / (self.scalars.h * self.scalars.h)
            * self.geometry.amplitude()
    }
}

impl ModeSolver for TeSolver {
    fn family(&self) -> ModeFamily {
        ModeFamily::Te
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

    fn hz(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        self.geometry.amplitude() * phase.cos() * (s.kx * x).cos() * (s.ky * y).cos()
    }

    fn ez(&self, _x: f64, _y: f64, _z: f64, _t: f64) -> f64 {
        0.0
    }

    fn hx(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        self.transverse_h_scale() * s.kx * phase.sin() * (s.kx * x).sin() * (s.ky * y).cos()
    }

    fn hy(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        self.transverse_h_scale() * s.ky * phase.sin() * (s.kx * x).cos() * (s.ky * y).sin()
    }

    fn ex(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        self.transverse_e_scale() * s.ky * phase.sin() * (s.kx * x).cos() * (s.ky * y).sin()
    }

    fn ey(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = &self.scalars;
        let phase = s.phase(self.geometry.omega(), z, t);
        -self.transverse_e_scale() * s.kx * phase.sin() * (s.kx * x).sin() * (s.ky * y).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY};
    use std::f64::consts::PI;

    const OMEGA: f64 = 6e10;

    fn te(m: u32, n: u32) -> TeSolver {
        let g = WaveguideGeometry::new(0.05, 0.03, OMEGA, VACUUM_PERMITTIVITY, VACUUM_PERMEABILITY, m, n);
        TeSolver::new(g).unwrap()
    }

    #[test]
    fn test_ez_vanishes() {
        let solver = te(1, 0);
        for i in 0..10 {
            let s = i as f64 / 9.0;
            assert_eq!(solver.ez(0.05 * s, 0.03 * s, 0.02 * s, s), 0.0);
        }
    }

    #[test]
    fn test_propagation_constant() {
        let solver = te(1, 0);
        let h = PI / 0.05;
        let gamma = (OMEGA * OMEGA * VACUUM_PERMITTIVITY * VACUUM_PERMEABILITY - h * h).sqrt();
        assert!((solver.transverse_wavenumber() - h).abs() < 1e-9 * h);
        assert!((solver.propagation_constant() - gamma).abs() < 1e-9 * gamma);
    }

    #[test]
    fn test_te10_field_pattern() {
        let solver = te(1, 0);
        let (a, h) = (0.05, PI / 0.05);
        let gamma = solver.propagation_constant();
        let (x, y, z, t) = (0.013, 0.007, 0.004, 2e-10);
        let phase = OMEGA * t - gamma * z;

        // n = 0: no y variation, so Hy and Ex vanish
        assert!(solver.hy(x, y, z, t).abs() < 1e-12);
        assert!(solver.ex(x, y, z, t).abs() < 1e-12);

        let hz = phase.cos() * (PI * x / a).cos();
        let hx = gamma / (h * h) * (PI / a) * phase.sin() * (PI * x / a).sin();
        let ey = -(OMEGA * VACUUM_PERMEABILITY / (h * h)) * (PI / a) * phase.sin() * (PI * x / a).sin();
        assert!((solver.hz(x, y, z, t) - hz).abs() < 1e-9);
        assert!((solver.hx(x, y, z, t) - hx).abs() < 1e-9 * hx.abs().max(1.0));
        assert!((solver.ey(x, y, z, t) - ey).abs() < 1e-9 * ey.abs().max(1.0));
    }

    #[test]
    fn test_amplitude_scales_every_component() {
        let g = WaveguideGeometry::new(0.05, 0.03, OMEGA, VACUUM_PERMITTIVITY, VACUUM_PERMEABILITY, 1, 1);
        let unit = TeSolver::new(g).unwrap();
        let doubled = TeSolver::new(g.with_amplitude(2.0)).unwrap();
        let (x, y, z, t) = (0.011, 0.009, 0.003, 1e-10);
        assert!((doubled.hz(x, y, z, t) - 2.0 * unit.hz(x, y, z, t)).abs() < 1e-12);
        assert!((doubled.ex(x, y, z, t) - 2.0 * unit.ex(x, y, z, t)).abs() < 1e-9 * unit.ex(x, y, z, t).abs());
    }

    #[test]
    fn test_evaluation_is_pure() {
        let solver = te(2, 1);
        let first = solver.hx(0.021, 0.012, 0.006, 1.0);
        let second = solver.hx(0.021, 0.012, 0.006, 1.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cutoff_depends_only_on_a() {
        let c = 1.0 / (VACUUM_PERMITTIVITY * VACUUM_PERMEABILITY).sqrt();
        let expected = c / 2.0 / 0.05;
        assert!((te(1, 0).cutoff_frequency() - expected).abs() < 1e-6 * expected);
        assert_eq!(te(1, 0).cutoff_frequency(), te(1, 1).cutoff_frequency());
    }

    #[test]
    fn test_evanescent_mode_is_reported() {
        let g = WaveguideGeometry::new(0.05, 0.03, 1e9, VACUUM_PERMITTIVITY, VACUUM_PERMEABILITY, 1, 0);
        let err = TeSolver::new(g).unwrap_err();
        match err {
            ModeError::EvanescentMode { family, omega, cutoff_omega, .. } => {
                assert_eq!(family, ModeFamily::Te);
                assert_eq!(omega, 1e9);
                assert!(cutoff_omega > omega);
            }
            other => panic!("Expected EvanescentMode, got {:?}", other),
        }
    }

    #[test]
    fn test_reconfigure_replaces_derived_state() {
        let mut solver = te(1, 0);
        let g = WaveguideGeometry::new(0.04, 0.02, OMEGA, VACUUM_PERMITTIVITY, VACUUM_PERMEABILITY, 1, 0);
        solver.reconfigure(g).unwrap();
        assert_eq!(solver.geometry().a(), 0.04);
        assert!((solver.transverse_wavenumber() - PI / 0.04).abs() < 1e-9);
        assert_eq!(solver, TeSolver::new(g).unwrap());
    }
}
