//! Explicit forward Euler integration of the inductor/capacitor state.

use crate::design::DerivedParameters;

/// Instantaneous state of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationState {
    /// Simulated time (s)
    pub time: f64,
    /// Inductor current (A)
    pub inductor_current: f64,
    /// Output (capacitor) voltage (V)
    pub output_voltage: f64,
}

impl SimulationState {
    /// Fully discharged converter at t = 0.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Whether both state variables are finite.
    pub fn is_finite(&self) -> bool {
        self.inductor_current.is_finite() && self.output_voltage.is_finite()
    }
}

/// Fixed-step forward Euler integrator for the L-C-R output network.
///
/// ```text
/// iL' = iL + (vL / L) * dt
/// vO' = vO + ((iL - vO / R) / C) * dt
/// ```
///
/// Both updates read the state at the start of the step; the new inductor
/// current does not feed the capacitor update of the same step.
#[derive(Debug, Clone, Copy)]
pub struct ForwardEuler {
    dt: f64,
    inductance: f64,
    capacitance: f64,
    load_resistance: f64,
}

impl ForwardEuler {
    pub fn new(dt: f64, inductance: f64, capacitance: f64, load_resistance: f64) -> Self {
        Self {
            dt,
            inductance,
            capacitance,
            load_resistance,
        }
    }

    /// Integrator for a derived design at step `dt`.
    pub fn from_params(params: &DerivedParameters, dt: f64) -> Self {
        Self::new(
            dt,
            params.inductance,
            params.capacitance,
            params.load_resistance,
        )
    }

    /// The fixed time step (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advance inductor current and output voltage by one step.
    ///
    /// The caller owns the time axis; `state.time` is left untouched.
    pub fn advance(&self, state: &mut SimulationState, inductor_voltage: f64) {
        let i_l = state.inductor_current;
        let i_load = state.output_voltage / self.load_resistance;

        state.inductor_current = i_l + (inductor_voltage / self.inductance) * self.dt;
        state.output_voltage += (i_l - i_load) / self.capacitance * self.dt;
    }
}
