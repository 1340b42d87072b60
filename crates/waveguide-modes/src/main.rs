//! waveguide-modes: CLI tool for sampling rectangular waveguide mode fields

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use waveguide_modes::constants::DEFAULT_SAMPLE_TIME;
use waveguide_modes::export::PlotOptions;
use waveguide_modes::{
    configure, generate_plot_script, sample_field, FieldKind, ModeFamily, ModeSolver, RawConfiguration,
    SampleGrid,
};

#[derive(Parser, Debug)]
#[command(name = "waveguide-modes")]
#[command(about = "Sample TE/TM mode fields of a rectangular waveguide")]
#[command(version)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode family (te, tm)
    #[arg(long)]
    family: Option<String>,

    /// Field to sample (electric, magnetic)
    #[arg(long)]
    field: Option<String>,

    /// Operating frequency in GHz
    #[arg(long)]
    frequency: Option<f64>,

    /// Length of the waveguide in cm
    #[arg(long)]
    length: Option<f64>,

    /// Width of the waveguide in cm
    #[arg(long)]
    width: Option<f64>,

    /// Refractive index of the dielectric
    #[arg(long)]
    index: Option<f64>,

    /// Mode index m
    #[arg(short)]
    m: Option<f64>,

    /// Mode index n
    #[arg(short)]
    n: Option<f64>,

    /// Reference field amplitude
    #[arg(long)]
    amplitude: Option<f64>,

    /// Snapshot time in seconds
    #[arg(long, default_value_t = DEFAULT_SAMPLE_TIME)]
    time: f64,

    /// Grid points along x, y, z (each at least 1)
    #[arg(long, num_args = 3, value_names = ["NX", "NY", "NZ"], value_parser = parse_count)]
    grid: Option<Vec<usize>>,

    /// Output JSON file for the field samples
    #[arg(short, long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Also write a Python plot script that loads the output file
    #[arg(long, requires = "output")]
    plot_script: Option<PathBuf>,

    /// Print samples to stdout
    #[arg(long)]
    stdout: bool,
}

fn parse_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("grid count must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(e) => Err(format!("Invalid grid count '{}': {}", s, e)),
    }
}

impl Args {
    fn raw_configuration(&self) -> Result<RawConfiguration> {
        let mut raw = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_json::from_str(&json).with_context(|| format!("Invalid config file: {:?}", path))?
            }
            None => RawConfiguration::default(),
        };

        if let Some(family) = &self.family {
            raw.family = family.parse::<ModeFamily>().map_err(anyhow::Error::msg)?;
        }
        if let Some(field) = &self.field {
            raw.field_kind = field.parse::<FieldKind>().map_err(anyhow::Error::msg)?;
        }
        if let Some(v) = self.frequency {
            raw.frequency_ghz = v;
        }
        if let Some(v) = self.length {
            raw.length_cm = v;
        }
        if let Some(v) = self.width {
            raw.width_cm = v;
        }
        if let Some(v) = self.index {
            raw.refractive_index = v;
        }
        if let Some(v) = self.m {
            raw.m = v;
        }
        if let Some(v) = self.n {
            raw.n = v;
        }
        if let Some(v) = self.amplitude {
            raw.amplitude = v;
        }

        Ok(raw)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let raw = args.raw_configuration()?;

    let mode = configure(&raw).context("Failed to build mode solver")?;
    if let Some(correction) = &mode.correction {
        warn!("{}", correction.notice());
    }

    info!(
        "{}: h = {:.4} 1/m, gamma = {:.4} 1/m, cutoff = {:.4e} Hz",
        mode.config.describe(),
        mode.solver.transverse_wavenumber(),
        mode.solver.propagation_constant(),
        mode.solver.cutoff_frequency()
    );

    let mut grid = SampleGrid::for_configuration(&mode.config);
    if let Some(counts) = &args.grid {
        grid = grid.with_counts(counts[0], counts[1], counts[2]);
    }

    let samples = sample_field(&mode.solver, mode.config.field_kind(), &grid, args.time);
    info!("Sampled {} points, peak |F| = {:.4e}", samples.len(), samples.peak_magnitude());

    let json = samples.to_json().context("Failed to serialize samples")?;

    if args.stdout {
        println!("{}", json);
    }
    if let Some(output) = &args.output {
        fs::write(output, &json).with_context(|| format!("Failed to write output file: {:?}", output))?;
        info!("Wrote samples: {:?}", output);
    }

    if let Some(path) = &args.plot_script {
        let data_file = args
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .context("--plot-script requires --output")?;
        let options = PlotOptions {
            data_file,
            outline: false,
        };
        let script = generate_plot_script(&samples, &options).context("Plot script generation failed")?;
        fs::write(path, &script).with_context(|| format!("Failed to write plot script: {:?}", path))?;
        info!("Generated plot script: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("waveguide-modes").chain(args.iter().copied()))
    }

    #[test]
    fn test_output_destination_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--family", "te"]).is_err());
        assert!(parse(&["--stdout"]).is_ok());
        assert!(parse(&["-o", "samples.json"]).is_ok());
    }

    #[test]
    fn test_plot_script_requires_output_file() {
        assert!(parse(&["--stdout", "--plot-script", "plot.py"]).is_err());
        let args = parse(&["-o", "samples.json", "--plot-script", "plot.py"]).unwrap();
        assert_eq!(args.plot_script, Some(PathBuf::from("plot.py")));
    }

    #[test]
    fn test_zero_grid_count_is_rejected() {
        assert!(parse(&["--stdout", "--grid", "0", "5", "5"]).is_err());
        assert!(parse(&["--stdout", "--grid", "4", "x", "5"]).is_err());

        let args = parse(&["--stdout", "--grid", "4", "3", "2"]).unwrap();
        assert_eq!(args.grid, Some(vec![4, 3, 2]));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mode.json");
        fs::write(&path, r#"{"family": "TE", "frequency_ghz": 12.0, "m": 2, "n": 0}"#).unwrap();
        let config = path.display().to_string();

        let raw = parse(&["--stdout", "-c", &config]).unwrap().raw_configuration().unwrap();
        assert_eq!(raw.family, ModeFamily::Te);
        assert_eq!(raw.frequency_ghz, 12.0);
        assert_eq!((raw.m, raw.n), (2.0, 0.0));

        let raw = parse(&["--stdout", "-c", &config, "--family", "tm", "-n", "1", "--field", "magnetic"])
            .unwrap()
            .raw_configuration()
            .unwrap();
        assert_eq!(raw.family, ModeFamily::Tm);
        assert_eq!(raw.field_kind, FieldKind::Magnetic);
        assert_eq!(raw.frequency_ghz, 12.0);
        assert_eq!((raw.m, raw.n), (2.0, 1.0));
    }

    #[test]
    fn test_bad_flag_values_are_reported() {
        let args = parse(&["--stdout", "--family", "quasi-tem"]).unwrap();
        assert!(args.raw_configuration().is_err());

        let args = parse(&["--stdout", "-c", "/nonexistent/mode.json"]).unwrap();
        let err = args.raw_configuration().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
