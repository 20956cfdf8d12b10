//! Console report and waveform export.
//!
//! The library does not draw anything. It hands the waveform to whatever
//! renders it as CSV, with the nominal output voltage repeated on each row
//! so a plot can overlay it directly.

use std::io::Write;

use crate::design::DerivedParameters;
use crate::error::{ConverterError, Result};
use crate::solver::SimulationResult;

/// Write the waveform as CSV.
///
/// Every `stride`-th sample is written, and the final sample always is.
///
/// Format:
/// ```csv
/// time_s,inductor_current_a,output_voltage_v,reference_v
/// 0,0,0,250
/// 1e-7,0.01,0,250
/// ```
pub fn write_waveform_csv<W: Write>(
    result: &SimulationResult,
    stride: usize,
    writer: &mut W,
) -> Result<()> {
    if stride == 0 {
        return Err(ConverterError::OutputError {
            message: "CSV stride must be at least 1".to_string(),
        });
    }

    let reference = result.reference_output_voltage();
    let last = result.len().saturating_sub(1);

    writeln!(writer, "time_s,inductor_current_a,output_voltage_v,reference_v")?;
    for (k, s) in result.samples().iter().enumerate() {
        if k % stride != 0 && k != last {
            continue;
        }
        writeln!(
            writer,
            "{},{},{},{}",
            s.time, s.inductor_current, s.output_voltage, reference
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn write_ripple<W: Write>(
    writer: &mut W,
    name: &str,
    unit: &str,
    measured: f64,
    target: Option<f64>,
) -> Result<()> {
    match target {
        Some(target) => writeln!(
            writer,
            "  {name} ripple = {measured:.3} {unit} (target {target:.3} {unit}, {:+.2}%)",
            (measured - target) / target * 100.0
        )?,
        None => writeln!(writer, "  {name} ripple = {measured:.3} {unit}")?,
    }
    Ok(())
}

/// Write the derived parameters and, if available, the steady-state summary.
pub fn write_report<W: Write>(
    params: &DerivedParameters,
    result: Option<&SimulationResult>,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "{params}")?;

    let Some(result) = result else {
        return Ok(());
    };
    let stats = result.final_period_stats();

    let reference = result.reference_output_voltage();
    let error_pct = (stats.mean_output_voltage - reference) / reference * 100.0;

    writeln!(writer)?;
    writeln!(writer, "Steady state (final switching period):")?;
    writeln!(
        writer,
        "  vO avg = {:.3} V (reference {:.3} V, {:+.2}%)",
        stats.mean_output_voltage, reference, error_pct
    )?;
    write_ripple(
        writer,
        "vO",
        "V",
        stats.output_voltage_ripple,
        params.target_output_voltage_ripple(),
    )?;
    writeln!(writer, "  iL avg = {:.3} A", stats.mean_inductor_current)?;
    write_ripple(
        writer,
        "iL",
        "A",
        stats.inductor_current_ripple,
        params.target_inductor_current_ripple(),
    )?;
    writeln!(
        writer,
        "  peak |vO| = {:.3} V, peak |iL| = {:.3} A",
        result.max_abs_output_voltage(),
        result.max_abs_inductor_current()
    )?;
    Ok(())
}
