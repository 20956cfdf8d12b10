//! Specification validation.

use crate::error::{ConverterError, Result};

use super::{ConverterSpec, Drive, Filter, Load, Topology};

/// Validate a converter specification before any derivation or simulation.
///
/// Checks:
/// - Voltages, frequency, power, resistance and components are finite and positive
/// - Ripple fractions lie strictly between 0 and 1
/// - Duty cycle lies strictly between 0 and 1
/// - Boost targets an output above the input, buck one below it
pub fn validate_spec(spec: &ConverterSpec) -> Result<()> {
    positive("input voltage", spec.input_voltage)?;
    positive("switching frequency", spec.switching_frequency)?;

    match spec.drive {
        Drive::DutyCycle(d) => fraction("duty cycle", d)?,
        Drive::OutputVoltage(v) => {
            positive("output voltage", v)?;
            let vin = spec.input_voltage;
            match spec.topology {
                Topology::Boost if v <= vin => {
                    return Err(ConverterError::invalid_spec(format!(
                        "boost output voltage {v} V must exceed input voltage {vin} V"
                    )));
                }
                Topology::Buck if v >= vin => {
                    return Err(ConverterError::invalid_spec(format!(
                        "buck output voltage {v} V must be below input voltage {vin} V"
                    )));
                }
                _ => {}
            }
        }
    }

    match spec.load {
        Load::Power(p) => positive("output power", p)?,
        Load::Resistance(r) => positive("load resistance", r)?,
    }

    match spec.filter {
        Filter::Ripple { current, voltage } => {
            fraction("current ripple", current)?;
            fraction("voltage ripple", voltage)?;
        }
        Filter::Components {
            inductance,
            capacitance,
        } => {
            positive("inductance", inductance)?;
            positive("capacitance", capacitance)?;
        }
    }

    Ok(())
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConverterError::invalid_spec(format!(
            "{name} must be a positive finite number (got {value})"
        )))
    }
}

fn fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConverterError::invalid_spec(format!(
            "{name} must lie strictly between 0 and 1 (got {value})"
        )))
    }
}
