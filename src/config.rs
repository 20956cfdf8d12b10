//! YAML design files.
//!
//! A design file holds one converter and, optionally, the run used to
//! simulate it:
//!
//! ```yaml
//! converter:
//!   topology: boost
//!   input_voltage: 100.0
//!   output_voltage: 250.0        # or: duty_cycle
//!   switching_frequency: 50000.0
//!   output_power: 800.0          # or: load_resistance
//!   current_ripple: 0.15         # or: inductance + capacitance
//!   voltage_ripple: 0.015
//! simulation:
//!   duration: 0.02
//!   steps_per_period: 200
//! ```
//!
//! Unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::{ConverterSpec, Drive, Filter, Load, Topology};
use crate::error::{ConverterError, Result};
use crate::solver::SimulationConfig;

/// A parsed design file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Design {
    pub spec: ConverterSpec,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DesignFile {
    converter: ConverterSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    simulation: Option<SimulationSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConverterSection {
    topology: Option<Topology>,
    input_voltage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_voltage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duty_cycle: Option<f64>,
    switching_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    load_resistance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_ripple: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voltage_ripple: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inductance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacitance: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steps_per_period: Option<usize>,
}

fn required(name: &str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| ConverterError::invalid_spec(format!("missing required field '{name}'")))
}

/// Pick exactly one of two alternative fields.
fn one_of<T>(
    (a_name, a): (&str, Option<f64>),
    (b_name, b): (&str, Option<f64>),
    on_a: impl FnOnce(f64) -> T,
    on_b: impl FnOnce(f64) -> T,
) -> Result<T> {
    match (a, b) {
        (Some(v), None) => Ok(on_a(v)),
        (None, Some(v)) => Ok(on_b(v)),
        (Some(_), Some(_)) => Err(ConverterError::invalid_spec(format!(
            "give either '{a_name}' or '{b_name}', not both"
        ))),
        (None, None) => Err(ConverterError::invalid_spec(format!(
            "one of '{a_name}' or '{b_name}' is required"
        ))),
    }
}

impl TryFrom<ConverterSection> for ConverterSpec {
    type Error = ConverterError;

    fn try_from(section: ConverterSection) -> Result<Self> {
        let topology = section
            .topology
            .ok_or_else(|| ConverterError::invalid_spec("missing required field 'topology'"))?;

        let drive = one_of(
            ("output_voltage", section.output_voltage),
            ("duty_cycle", section.duty_cycle),
            Drive::OutputVoltage,
            Drive::DutyCycle,
        )?;
        let load = one_of(
            ("output_power", section.output_power),
            ("load_resistance", section.load_resistance),
            Load::Power,
            Load::Resistance,
        )?;

        let ripple = section.current_ripple.is_some() || section.voltage_ripple.is_some();
        let components = section.inductance.is_some() || section.capacitance.is_some();
        let filter = match (ripple, components) {
            (true, false) => Filter::Ripple {
                current: required("current_ripple", section.current_ripple)?,
                voltage: required("voltage_ripple", section.voltage_ripple)?,
            },
            (false, true) => Filter::Components {
                inductance: required("inductance", section.inductance)?,
                capacitance: required("capacitance", section.capacitance)?,
            },
            (true, true) => {
                return Err(ConverterError::invalid_spec(
                    "give either ripple targets or inductance/capacitance, not both",
                ))
            }
            (false, false) => {
                return Err(ConverterError::invalid_spec(
                    "ripple targets or inductance/capacitance are required",
                ))
            }
        };

        Ok(ConverterSpec::new(
            topology,
            required("input_voltage", section.input_voltage)?,
            drive,
            required("switching_frequency", section.switching_frequency)?,
            load,
            filter,
        ))
    }
}

impl From<&ConverterSpec> for ConverterSection {
    fn from(spec: &ConverterSpec) -> Self {
        let mut section = ConverterSection {
            topology: Some(spec.topology),
            input_voltage: Some(spec.input_voltage),
            switching_frequency: Some(spec.switching_frequency),
            ..Default::default()
        };
        match spec.drive {
            Drive::OutputVoltage(v) => section.output_voltage = Some(v),
            Drive::DutyCycle(d) => section.duty_cycle = Some(d),
        }
        match spec.load {
            Load::Power(p) => section.output_power = Some(p),
            Load::Resistance(r) => section.load_resistance = Some(r),
        }
        match spec.filter {
            Filter::Ripple { current, voltage } => {
                section.current_ripple = Some(current);
                section.voltage_ripple = Some(voltage);
            }
            Filter::Components {
                inductance,
                capacitance,
            } => {
                section.inductance = Some(inductance);
                section.capacitance = Some(capacitance);
            }
        }
        section
    }
}

/// Parse a design from YAML text.
pub fn parse_design(input: &str) -> Result<Design> {
    let file: DesignFile = serde_yaml::from_str(input)?;
    let spec = ConverterSpec::try_from(file.converter)?;

    let mut simulation = SimulationConfig::default();
    if let Some(section) = file.simulation {
        if let Some(duration) = section.duration {
            simulation.duration = duration;
        }
        if let Some(steps) = section.steps_per_period {
            simulation.steps_per_period = steps;
        }
    }

    Ok(Design { spec, simulation })
}

/// Load a design file from disk.
pub fn load_design(path: &Path) -> Result<Design> {
    let content = std::fs::read_to_string(path).map_err(|e| ConverterError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_design(&content)
}

/// Serialize a design back to YAML.
pub fn design_to_yaml(design: &Design) -> Result<String> {
    let file = DesignFile {
        converter: ConverterSection::from(&design.spec),
        simulation: Some(SimulationSection {
            duration: Some(design.simulation.duration),
            steps_per_period: Some(design.simulation.steps_per_period),
        }),
    };
    Ok(serde_yaml::to_string(&file)?)
}
