//! Python plot script generation for sampled fields

use anyhow::Result;
use minijinja::{context, Environment};

use crate::sampling::FieldSamples;
use crate::LengthUnit;

const PLOT_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Waveguide mode field plot - Auto-generated by waveguide-modes
{{ title }}

Generated: {{ timestamp }}
Samples: {{ count }} points at t = {{ "%.3e"|format(time) }} s
"""

import json
import os
import sys

import numpy as np
from mayavi import mlab

# =============================================================================
# Mode Parameters
# =============================================================================

FAMILY = "{{ family }}"
FIELD = "{{ field_kind }}"
M = {{ m }}
N = {{ n }}

# Guide cross-section (cm)
A_CM = {{ "%.6f"|format(a_cm) }}
B_CM = {{ "%.6f"|format(b_cm) }}

# Propagation constant (1/m) and cutoff frequency
GAMMA = {{ "%.6e"|format(gamma) }}
CUTOFF = {{ "%.6e"|format(cutoff) }}

# Sample positions are stored in meters; plot in cm
POSITION_SCALE = {{ "%.1f"|format(position_scale) }}

DATA_FILE = "{{ data_file }}"


def load_samples(path):
    """Load positions and vectors from the sample file."""
    with open(path) as f:
        data = json.load(f)
    positions = np.asarray(data["positions"]) * POSITION_SCALE
    vectors = np.asarray(data["vectors"])
    return positions, vectors


def main():
    path = sys.argv[1] if len(sys.argv) > 1 else DATA_FILE
    if not os.path.exists(path):
        print(f"Sample file not found: {path}")
        sys.exit(1)

    positions, vectors = load_samples(path)

    mlab.figure(size=(1100, 700))
    mlab.quiver3d(
        positions[:, 0], positions[:, 1], positions[:, 2],
        vectors[:, 0], vectors[:, 1], vectors[:, 2],
    )
    mlab.colorbar(title=f"{FAMILY}({M},{N}) {FIELD} field")
{% if outline %}
    mlab.outline()
{% endif %}
    mlab.show()


if __name__ == "__main__":
    main()
"##;

/// Options for the generated script
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Path the script loads samples from when none is given on its command line
    pub data_file: String,
    /// Draw a bounding box around the samples
    pub outline: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            data_file: "samples.json".to_string(),
            outline: false,
        }
    }
}

/// Generate a Python script that draws `samples` as a 3-D quiver plot
pub fn generate_plot_script(samples: &FieldSamples, options: &PlotOptions) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("plot", PLOT_TEMPLATE)?;

    let template = env.get_template("plot")?;

    let title = format!(
        "{}({},{}) {} field",
        samples.family, samples.m, samples.n, samples.field_kind
    );

    let output = template.render(context! {
        title => title,
        timestamp => chrono::Utc::now().to_rfc3339(),
        count => samples.len(),
        time => samples.time,
        family => samples.family.to_string(),
        field_kind => samples.field_kind.to_string(),
        m => samples.m,
        n => samples.n,
        a_cm => LengthUnit::Centimeter.from_meters(samples.a),
        b_cm => LengthUnit::Centimeter.from_meters(samples.b),
        gamma => samples.propagation_constant,
        cutoff => samples.cutoff_frequency,
        position_scale => LengthUnit::Meter.scale_to(&LengthUnit::Centimeter),
        data_file => options.data_file.as_str(),
        outline => options.outline,
    })?;

    Ok(output)
}
