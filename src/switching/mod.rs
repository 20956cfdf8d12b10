//! Switch state model.
//!
//! The converter alternates between two states on a fixed schedule:
//!
//! ```text
//!   |<-- D*Ts -->|<---- (1-D)*Ts ---->|
//!   | conducting | non-conducting     | conducting ...
//!   0           D*Ts                  Ts
//! ```
//!
//! The schedule is open-loop: nothing but elapsed time decides the state.
//! Each topology supplies a [`PowerStage`] mapping the state to the voltage
//! across the inductor.

mod phase;
mod stage;

pub use phase::{cycle_time, switch_state, SwitchState};
pub use stage::{BoostStage, BuckStage, PowerStage};

use crate::design::{DerivedParameters, Topology};

/// Stateless inductor-voltage source for one converter.
#[derive(Clone, Copy)]
pub struct SwitchModel {
    topology: Topology,
    stage: &'static dyn PowerStage,
    period: f64,
    duty_cycle: f64,
    input_voltage: f64,
}

impl SwitchModel {
    /// Create a switch model from its parameters.
    pub fn new(topology: Topology, period: f64, duty_cycle: f64, input_voltage: f64) -> Self {
        Self {
            topology,
            stage: topology.power_stage(),
            period,
            duty_cycle,
            input_voltage,
        }
    }

    /// Create the switch model for a derived design.
    pub fn from_params(params: &DerivedParameters) -> Self {
        Self::new(
            params.topology,
            params.switching_period,
            params.duty_cycle,
            params.input_voltage,
        )
    }

    /// Switch state at time `t`.
    pub fn state_at(&self, t: f64) -> SwitchState {
        switch_state(t, self.period, self.duty_cycle)
    }

    /// Inductor voltage at time `t` given the present output voltage.
    pub fn inductor_voltage(&self, t: f64, output_voltage: f64) -> f64 {
        self.stage
            .inductor_voltage(self.state_at(t), self.input_voltage, output_voltage)
    }
}

impl std::fmt::Debug for SwitchModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchModel")
            .field("topology", &self.topology)
            .field("period", &self.period)
            .field("duty_cycle", &self.duty_cycle)
            .field("input_voltage", &self.input_voltage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buck_schedule() {
        let ts = 40e-6;
        let model = SwitchModel::new(Topology::Buck, ts, 0.5, 36.0);

        assert_eq!(model.inductor_voltage(0.1 * ts, 10.0), 26.0);
        assert_eq!(model.inductor_voltage(0.6 * ts, 10.0), -10.0);
        assert_eq!(model.inductor_voltage(1.1 * ts, 10.0), 26.0);
    }

    #[test]
    fn test_boost_schedule() {
        let ts = 20e-6;
        let model = SwitchModel::new(Topology::Boost, ts, 0.6, 100.0);

        assert!(model.state_at(0.59 * ts).is_conducting());
        assert!(!model.state_at(0.61 * ts).is_conducting());
        assert_eq!(model.inductor_voltage(0.3 * ts, 240.0), 100.0);
        assert_eq!(model.inductor_voltage(0.8 * ts, 240.0), -140.0);
    }
}
