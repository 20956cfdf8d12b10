//! Per-topology power stages.

use crate::design::Topology;

use super::SwitchState;

/// The voltage a topology impresses across its inductor in each switch state.
pub trait PowerStage: Send + Sync {
    /// Instantaneous inductor voltage for the given switch state, input
    /// voltage and present output voltage.
    fn inductor_voltage(&self, state: SwitchState, input_voltage: f64, output_voltage: f64) -> f64;
}

/// Step-down stage: the inductor sits between the switch node and the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuckStage;

impl PowerStage for BuckStage {
    fn inductor_voltage(&self, state: SwitchState, input_voltage: f64, output_voltage: f64) -> f64 {
        match state {
            SwitchState::Conducting => input_voltage - output_voltage,
            // Freewheeling through the diode
            SwitchState::NonConducting => -output_voltage,
        }
    }
}

/// Step-up stage: the inductor sits between the input and the switch node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoostStage;

impl PowerStage for BoostStage {
    fn inductor_voltage(&self, state: SwitchState, input_voltage: f64, output_voltage: f64) -> f64 {
        match state {
            // Switch shorts the inductor across the input
            SwitchState::Conducting => input_voltage,
            SwitchState::NonConducting => input_voltage - output_voltage,
        }
    }
}

static BUCK: BuckStage = BuckStage;
static BOOST: BoostStage = BoostStage;

impl Topology {
    /// The power stage implementing this topology.
    pub fn power_stage(self) -> &'static dyn PowerStage {
        match self {
            Topology::Buck => &BUCK,
            Topology::Boost => &BOOST,
        }
    }
}
