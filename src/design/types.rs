//! Core types for converter design.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Converter topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Step-down converter (Vout < Vin)
    Buck,
    /// Step-up converter (Vout > Vin)
    Boost,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Buck => write!(f, "buck"),
            Topology::Boost => write!(f, "boost"),
        }
    }
}

/// The primary design driver. The other quantity is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    /// Target output voltage in volts
    OutputVoltage(f64),
    /// Duty cycle, strictly between 0 and 1
    DutyCycle(f64),
}

/// How the load is described.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Load {
    /// Output power in watts
    Power(f64),
    /// Load resistance in ohms
    Resistance(f64),
}

/// How the output filter (L, C) is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Size L and C from peak-to-peak ripple targets, as fractions of the
    /// average inductor current and output voltage.
    Ripple { current: f64, voltage: f64 },
    /// Use the supplied component values (henries, farads).
    Components { inductance: f64, capacitance: f64 },
}

/// Peak-to-peak ripple targets, as fractions of the average value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleTargets {
    /// Inductor current ripple relative to the average inductor current
    pub current: f64,
    /// Output voltage ripple relative to the output voltage
    pub voltage: f64,
}

/// Immutable design input for one converter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConverterSpec {
    pub topology: Topology,
    /// Input voltage in volts
    pub input_voltage: f64,
    pub drive: Drive,
    /// Switching frequency in hertz
    pub switching_frequency: f64,
    pub load: Load,
    pub filter: Filter,
}

impl ConverterSpec {
    /// Create a specification from its parts.
    pub fn new(
        topology: Topology,
        input_voltage: f64,
        drive: Drive,
        switching_frequency: f64,
        load: Load,
        filter: Filter,
    ) -> Self {
        Self {
            topology,
            input_voltage,
            drive,
            switching_frequency,
            load,
            filter,
        }
    }

    /// Replace the filter description.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the load description.
    pub fn with_load(mut self, load: Load) -> Self {
        self.load = load;
        self
    }
}

/// Electrical quantities derived from a [`ConverterSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParameters {
    pub topology: Topology,
    /// Input voltage (V)
    pub input_voltage: f64,
    /// Duty cycle, 0 < D < 1
    pub duty_cycle: f64,
    /// Switching frequency (Hz)
    pub switching_frequency: f64,
    /// Switching period Ts = 1/Fs (s)
    pub switching_period: f64,
    /// Nominal average output voltage (V)
    pub output_voltage: f64,
    /// Output current (A)
    pub output_current: f64,
    /// Input current, lossless (A)
    pub input_current: f64,
    /// Output power (W)
    pub output_power: f64,
    /// Load resistance (ohm)
    pub load_resistance: f64,
    /// Inductance (H)
    pub inductance: f64,
    /// Capacitance (F)
    pub capacitance: f64,
    /// Ripple targets L and C were sized for, if any
    pub ripple_targets: Option<RippleTargets>,
}

impl DerivedParameters {
    /// The output voltage a renderer should overlay on the waveform.
    pub fn reference_output_voltage(&self) -> f64 {
        self.output_voltage
    }

    /// Average inductor current in steady state.
    ///
    /// The buck inductor carries the load current and the boost inductor
    /// carries the input current.
    pub fn reference_inductor_current(&self) -> f64 {
        match self.topology {
            Topology::Buck => self.output_current,
            Topology::Boost => self.input_current,
        }
    }

    /// Target peak-to-peak inductor current ripple (A).
    pub fn target_inductor_current_ripple(&self) -> Option<f64> {
        self.ripple_targets
            .map(|r| r.current * self.reference_inductor_current())
    }

    /// Target peak-to-peak output voltage ripple (V).
    pub fn target_output_voltage_ripple(&self) -> Option<f64> {
        self.ripple_targets.map(|r| r.voltage * self.output_voltage)
    }

    /// Inductor/load time constant L/R (s).
    pub fn inductive_time_constant(&self) -> f64 {
        self.inductance / self.load_resistance
    }

    /// Load/capacitor time constant R*C (s).
    pub fn capacitive_time_constant(&self) -> f64 {
        self.load_resistance * self.capacitance
    }

    /// LC resonance time scale sqrt(L*C) (s), i.e. 1/omega_0.
    pub fn resonant_time_constant(&self) -> f64 {
        (self.inductance * self.capacitance).sqrt()
    }
}

impl fmt::Display for DerivedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topology = {}", self.topology)?;
        writeln!(f, "D = {:.3}", self.duty_cycle)?;
        writeln!(f, "Vout = {:.3} V", self.output_voltage)?;
        writeln!(f, "Iout = {:.3} A", self.output_current)?;
        writeln!(f, "Iin = {:.3} A", self.input_current)?;
        writeln!(f, "R = {:.3} ohms", self.load_resistance)?;
        writeln!(f, "L = {:.3} mH", self.inductance * 1e3)?;
        write!(f, "C = {:.3} uF", self.capacitance * 1e6)
    }
}
