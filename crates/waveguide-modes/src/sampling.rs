//! Field sampling over a regular 3-D grid
//!
//! Points are ordered x-major, then y, then z, which matches the flattened
//! layout of a `numpy.mgrid` volume.

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRID_NX, DEFAULT_GRID_NY, DEFAULT_GRID_NZ, DEFAULT_SECTION_LENGTH};
use crate::mode::{FieldKind, ModeFamily};
use crate::solver::ModeSolver;
use crate::validate::ModeConfiguration;

/// Evenly spaced samples on `[start, stop]`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl AxisRange {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    pub fn value(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.start;
        }
        self.start + (self.stop - self.start) * index as f64 / (self.count - 1) as f64
    }
}

/// Regular sampling volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl SampleGrid {
    pub fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Cross-section `[0, a] × [0, b]` over a 5 cm section of guide.
    pub fn for_configuration(config: &ModeConfiguration) -> Self {
        Self {
            x: AxisRange::new(0.0, config.a(), DEFAULT_GRID_NX),
            y: AxisRange::new(0.0, config.b(), DEFAULT_GRID_NY),
            z: AxisRange::new(0.0, DEFAULT_SECTION_LENGTH, DEFAULT_GRID_NZ),
        }
    }

    /// Same volume with a different resolution.
    pub fn with_counts(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.x.count = nx;
        self.y.count = ny;
        self.z.count = nz;
        self
    }

    pub fn len(&self) -> usize {
        self.x.count * self.y.count * self.z.count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point at flat index `index`
    pub fn point(&self, index: usize) -> Vector3<f64> {
        let k = index % self.z.count;
        let j = (index / self.z.count) % self.y.count;
        let i = index / (self.z.count * self.y.count);
        Vector3::new(self.x.value(i), self.y.value(j), self.z.value(k))
    }

    pub fn points(&self) -> Vec<Vector3<f64>> {
        (0..self.len()).map(|i| self.point(i)).collect()
    }
}

/// Vector field samples ready for a plotting surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSamples {
    pub family: ModeFamily,
    pub field_kind: FieldKind,
    pub m: u32,
    pub n: u32,
    /// Broad and narrow side (m)
    pub a: f64,
    pub b: f64,
    pub propagation_constant: f64,
    pub cutoff_frequency: f64,
    /// Snapshot instant (s)
    pub time: f64,
    pub grid: SampleGrid,
    /// Sample positions (m)
    pub positions: Vec<[f64; 3]>,
    pub vectors: Vec<[f64; 3]>,
    pub magnitudes: Vec<f64>,
}

impl FieldSamples {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest |F| over the grid; 0 for an empty grid
    pub fn peak_magnitude(&self) -> f64 {
        self.magnitudes.iter().copied().fold(0.0, f64::max)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Evaluate the `kind` triad at every grid point at time `t`.
///
/// Points are independent, so the grid is split across the rayon pool.
pub fn sample_field<S>(solver: &S, kind: FieldKind, grid: &SampleGrid, t: f64) -> FieldSamples
where
    S: ModeSolver + ?Sized,
{
    let samples: Vec<(Vector3<f64>, Vector3<f64>)> = (0..grid.len())
        .into_par_iter()
        .map(|i| {
            let p = grid.point(i);
            (p, solver.field(kind, &p, t))
        })
        .collect();

    let mut positions = Vec::with_capacity(samples.len());
    let mut vectors = Vec::with_capacity(samples.len());
    let mut magnitudes = Vec::with_capacity(samples.len());
    for (p, v) in &samples {
        positions.push([p.x, p.y, p.z]);
        vectors.push([v.x, v.y, v.z]);
        magnitudes.push(v.norm());
    }

    let geometry = solver.geometry();
    FieldSamples {
        family: solver.family(),
        field_kind: kind,
        m: geometry.m(),
        n: geometry.n(),
        a: geometry.a(),
        b: geometry.b(),
        propagation_constant: solver.propagation_constant(),
        cutoff_frequency: solver.cutoff_frequency(),
        time: t,
        grid: *grid,
        positions,
        vectors,
        magnitudes,
    }
}
