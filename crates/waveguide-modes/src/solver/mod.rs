//! Closed-form mode solvers for the rectangular waveguide.
//!
//! The [`ModeSolver`] trait is the capability set shared by the TE and TM
//! variants: construction from a [`WaveguideGeometry`], the six field
//! components, and the informational scalars (h, γ, cutoff frequency).
//! [`Solver`] is the tagged variant picked once per configuration.

pub mod te;
pub mod tm;

pub use te::TeSolver;
pub use tm::TmSolver;

use std::f64::consts::PI;

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::DEGENERATE_WAVENUMBER;
use crate::error::ModeError;
use crate::mode::{Component, FieldKind, ModeFamily};

/// h = sqrt((mπ/a)² + (nπ/b)²)
pub fn transverse_wavenumber(a: f64, b: f64, m: u32, n: u32) -> f64 {
    let kx = m as f64 * PI / a;
    let ky = n as f64 * PI / b;
    (kx * kx + ky * ky).sqrt()
}

/// Waveguide cross-section, medium, drive and mode indices.
///
/// The broad dimension is always `a`: [`WaveguideGeometry::new`] swaps the
/// two sides when they are supplied the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveguideGeometry {
    a: f64,
    b: f64,
    omega: f64,
    permittivity: f64,
    permeability: f64,
    m: u32,
    n: u32,
    amplitude: f64,
}

impl WaveguideGeometry {
    /// Build a geometry with unit reference amplitude.
    pub fn new(a: f64, b: f64, omega: f64, permittivity: f64, permeability: f64, m: u32, n: u32) -> Self {
        let (a, b) = if a > b { (a, b) } else { (b, a) };
        Self {
            a,
            b,
            omega,
            permittivity,
            permeability,
            m,
            n,
            amplitude: 1.0,
        }
    }

    /// Replace the reference amplitude (E₀ for TM, H₀ for TE).
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Broad side (m)
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Narrow side (m)
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Angular frequency ω
    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn permittivity(&self) -> f64 {
        self.permittivity
    }

    pub fn permeability(&self) -> f64 {
        self.permeability
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Transverse wavenumber h
    pub fn transverse_wavenumber(&self) -> f64 {
        transverse_wavenumber(self.a, self.b, self.m, self.n)
    }

    /// 1 / (2·sqrt(με)), the common factor of both cutoff formulas.
    pub fn cutoff_coefficient(&self) -> f64 {
        1.0 / (2.0 * (self.permeability * self.permittivity).sqrt())
    }

    /// ω below which this mode is evanescent: h / sqrt(με)
    pub fn cutoff_angular_frequency(&self) -> f64 {
        self.transverse_wavenumber() / (self.permeability * self.permittivity).sqrt()
    }

    fn check_physical(&self) -> Result<(), ModeError> {
        let positive = [
            ("waveguide side a", self.a),
            ("waveguide side b", self.b),
            ("angular frequency", self.omega),
            ("permittivity", self.permittivity),
            ("permeability", self.permeability),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModeError::NonPhysicalParameter { name, value });
            }
        }
        if !self.amplitude.is_finite() {
            return Err(ModeError::NonPhysicalParameter {
                name: "amplitude",
                value: self.amplitude,
            });
        }
        Ok(())
    }
}

/// Derived scalars shared by both solver variants.
///
/// Computed in one step so a solver never holds h from one configuration and
/// γ from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ModeScalars {
    /// mπ/a
    pub kx: f64,
    /// nπ/b
    pub ky: f64,
    /// Transverse wavenumber
    pub h: f64,
    /// Propagation constant
    pub gamma: f64,
}

impl ModeScalars {
    pub(crate) fn derive(geometry: &WaveguideGeometry, family: ModeFamily) -> Result<Self, ModeError> {
        geometry.check_physical()?;

        let kx = geometry.m as f64 * PI / geometry.a;
        let ky = geometry.n as f64 * PI / geometry.b;
        let h = geometry.transverse_wavenumber();
        if h < DEGENERATE_WAVENUMBER {
            return Err(ModeError::DegenerateGeometry {
                family,
                m: geometry.m,
                n: geometry.n,
            });
        }

        let k_squared = geometry.omega * geometry.omega * geometry.permittivity * geometry.permeability;
        let radicand = k_squared - h * h;
        // Finite inputs can still overflow ω²εμ
        if !k_squared.is_finite() || !radicand.is_finite() {
            return Err(ModeError::NonPhysicalParameter {
                name: "propagation constant",
                value: radicand,
            });
        }
        if radicand < 0.0 {
            return Err(ModeError::EvanescentMode {
                family,
                m: geometry.m,
                n: geometry.n,
                omega: geometry.omega,
                cutoff_omega: geometry.cutoff_angular_frequency(),
            });
        }

        Ok(Self {
            kx,
            ky,
            h,
            gamma: radicand.sqrt(),
        })
    }

    /// ωt − γz
    #[inline]
    pub(crate) fn phase(&self, omega: f64, z: f64, t: f64) -> f64 {
        omega * t - self.gamma * z
    }
}

/// Capability set shared by the TE and TM solvers.
pub trait ModeSolver: Send + Sync {
    fn family(&self) -> ModeFamily;

    /// The normalized geometry this solver was built from.
    fn geometry(&self) -> &WaveguideGeometry;

    /// Transverse wavenumber h
    fn transverse_wavenumber(&self) -> f64;

    /// Propagation constant γ
    fn propagation_constant(&self) -> f64;

    /// Informational cutoff frequency; not checked against the drive.
    fn cutoff_frequency(&self) -> f64;

    fn ex(&self, x: f64, y: f64, z: f64, t: f64) -> f64;
    fn ey(&self, x: f64, y: f64, z: f64, t: f64) -> f64;
    fn ez(&self, x: f64, y: f64, z: f64, t: f64) -> f64;
    fn hx(&self, x: f64, y: f64, z: f64, t: f64) -> f64;
    fn hy(&self, x: f64, y: f64, z: f64, t: f64) -> f64;
    fn hz(&self, x: f64, y: f64, z: f64, t: f64) -> f64;

    /// Evaluate a single component at a point.
    fn component(&self, component: Component, p: &Vector3<f64>, t: f64) -> f64 {
        let (x, y, z) = (p.x, p.y, p.z);
        match component {
            Component::Ex => self.ex(x, y, z, t),
            Component::Ey => self.ey(x, y, z, t),
            Component::Ez => self.ez(x, y, z, t),
            Component::Hx => self.hx(x, y, z, t),
            Component::Hy => self.hy(x, y, z, t),
            Component::Hz => self.hz(x, y, z, t),
        }
    }

    /// Evaluate the electric or magnetic field vector at a point.
    fn field(&self, kind: FieldKind, p: &Vector3<f64>, t: f64) -> Vector3<f64> {
        let [cx, cy, cz] = kind.components();
        Vector3::new(
            self.component(cx, p, t),
            self.component(cy, p, t),
            self.component(cz, p, t),
        )
    }

    /// Evaluate one component at every point, in order.
    fn evaluate(&self, component: Component, points: &[Vector3<f64>], t: f64) -> Vec<f64> {
        points.iter().map(|p| self.component(component, p, t)).collect()
    }

    /// Same as [`ModeSolver::evaluate`], spread across the rayon pool.
    fn par_evaluate(&self, component: Component, points: &[Vector3<f64>], t: f64) -> Vec<f64> {
        points.par_iter().map(|p| self.component(component, p, t)).collect()
    }
}

/// A solver for either mode family.
#[derive(Debug, Clone, PartialEq)]
pub enum Solver {
    Te(TeSolver),
    Tm(TmSolver),
}

impl Solver {
    /// Build the solver for `family`.
    pub fn new(family: ModeFamily, geometry: WaveguideGeometry) -> Result<Self, ModeError> {
        match family {
            ModeFamily::Te => TeSolver::new(geometry).map(Solver::Te),
            ModeFamily::Tm => TmSolver::new(geometry).map(Solver::Tm),
        }
    }

    /// Replace all inputs, keeping the family. On error `self` is untouched.
    pub fn reconfigure(&mut self, geometry: WaveguideGeometry) -> Result<(), ModeError> {
        match self {
            Solver::Te(s) => s.reconfigure(geometry),
            Solver::Tm(s) => s.reconfigure(geometry),
        }
    }

    fn inner(&self) -> &dyn ModeSolver {
        match self {
            Solver::Te(s) => s,
            Solver::Tm(s) => s,
        }
    }
}

impl ModeSolver for Solver {
    fn family(&self) -> ModeFamily {
        self.inner().family()
    }

    fn geometry(&self) -> &WaveguideGeometry {
        self.inner().geometry()
    }

    fn transverse_wavenumber(&self) -> f64 {
        self.inner().transverse_wavenumber()
    }

    fn propagation_constant(&self) -> f64 {
        self.inner().propagation_constant()
    }

    fn cutoff_frequency(&self) -> f64 {
        self.inner().cutoff_frequency()
    }

    fn ex(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().ex(x, y, z, t)
    }

    fn ey(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().ey(x, y, z, t)
    }

    fn ez(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().ez(x, y, z, t)
    }

    fn hx(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().hx(x, y, z, t)
    }

    fn hy(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().hy(x, y, z, t)
    }

    fn hz(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        self.inner().hz(x, y, z, t)
    }
}
