//! Reference designs.

use crate::solver::SimulationConfig;

use super::{ConverterSpec, Drive, Filter, Load, Topology};

/// A worked reference design together with the run that validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 36 V -> 18 V buck at 25 kHz with a 2.16 ohm load and a fixed 220 uH / 56 uF filter
    Buck,
    /// 100 V -> 250 V, 800 W boost at 50 kHz sized for 15% current and 1.5% voltage ripple
    Boost,
}

impl Preset {
    /// The converter specification.
    pub fn spec(self) -> ConverterSpec {
        match self {
            Preset::Buck => ConverterSpec::new(
                Topology::Buck,
                36.0,
                Drive::DutyCycle(0.5),
                25e3,
                Load::Resistance(2.16),
                Filter::Components {
                    inductance: 220e-6,
                    capacitance: 56e-6,
                },
            ),
            Preset::Boost => ConverterSpec::new(
                Topology::Boost,
                100.0,
                Drive::OutputVoltage(250.0),
                50e3,
                Load::Power(800.0),
                Filter::Ripple {
                    current: 0.15,
                    voltage: 0.015,
                },
            ),
        }
    }

    /// The simulation length and resolution used to validate the design.
    pub fn simulation(self) -> SimulationConfig {
        match self {
            Preset::Buck => SimulationConfig::new(8e-3).with_steps_per_period(300),
            Preset::Boost => SimulationConfig::new(20e-3).with_steps_per_period(200),
        }
    }
}
