//! convsim - DC-DC converter design and transient simulator
//!
//! Prints the derived component values for a buck or boost design, runs the
//! transient simulation and optionally exports the waveform for plotting.
//!
//! # Usage
//!
//! ```bash
//! convsim --preset boost --csv boost.csv
//! RUST_LOG=info convsim design.yaml --duration 0.01
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use converter_core::{
    config::{design_to_yaml, load_design, Design},
    derive_parameters,
    error::{ConverterError, Result},
    output::{write_report, write_waveform_csv},
    Preset, Simulator,
};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PresetArg {
    /// 36 V -> 18 V buck, 25 kHz
    Buck,
    /// 100 V -> 250 V boost, 50 kHz
    Boost,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Buck => Preset::Buck,
            PresetArg::Boost => Preset::Boost,
        }
    }
}

/// DC-DC converter design and transient simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["design_file", "preset"])))]
struct Args {
    /// Path to a YAML design file
    #[arg(value_name = "DESIGN_FILE")]
    design_file: Option<PathBuf>,

    /// Use a built-in reference design instead of a file
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Simulated duration in seconds (overrides the design)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Integration steps per switching period (overrides the design)
    #[arg(short = 'n', long)]
    steps_per_period: Option<usize>,

    /// Write the waveform as CSV to this path ('-' for stdout)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write only every N-th sample to the CSV
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// Print the derived parameters without simulating
    #[arg(long)]
    report_only: bool,

    /// Print the resolved design as YAML and exit
    #[arg(long)]
    print_design: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Resolve the design
    let mut design = match (&args.design_file, args.preset) {
        (Some(path), _) => load_design(path)?,
        (None, Some(preset)) => {
            let preset = Preset::from(preset);
            Design {
                spec: preset.spec(),
                simulation: preset.simulation(),
            }
        }
        (None, None) => unreachable!("clap requires a design file or --preset"),
    };
    if let Some(duration) = args.duration {
        design.simulation = design.simulation.with_duration(duration);
    }
    if let Some(steps) = args.steps_per_period {
        design.simulation = design.simulation.with_steps_per_period(steps);
    }

    if args.print_design {
        print!("{}", design_to_yaml(&design)?);
        return Ok(());
    }

    let params = derive_parameters(&design.spec)?;
    let mut stdout = BufWriter::new(io::stdout().lock());

    if args.report_only {
        write_report(&params, None, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let result = Simulator::new(params, design.simulation)?.run()?;

    match args.csv.as_deref() {
        Some(path) if path.as_os_str() == "-" => {
            write_waveform_csv(&result, args.stride, &mut stdout)?;
            // Keep the CSV stream clean; the report goes to stderr
            write_report(&params, Some(&result), &mut io::stderr())?;
        }
        Some(path) => {
            let file = File::create(path).map_err(|e| ConverterError::OutputError {
                message: format!("cannot create '{}': {e}", path.display()),
            })?;
            write_waveform_csv(&result, args.stride, &mut BufWriter::new(file))?;
            write_report(&params, Some(&result), &mut stdout)?;
        }
        None => write_report(&params, Some(&result), &mut stdout)?,
    }
    stdout.flush()?;

    Ok(())
}
