//! Transient solver.
//!
//! This module provides the numerical engine for converter simulation.
//!
//! ## State equations
//!
//! The converter reduces to two state variables, inductor current iL and
//! output voltage vO, driven by the inductor voltage vL that the switch
//! model supplies:
//!
//! ```text
//! L * diL/dt = vL(t, vO)
//! C * dvO/dt = iL - vO / R
//! ```
//!
//! The equations are advanced with explicit forward Euler on a uniform grid
//! `t_k = k * dt`, `dt = Ts / N`. There is no adaptive step control, so the
//! step is checked against the switching period and the circuit's time
//! constants once, before the run starts.

mod euler;
mod result;
mod simulator;
mod stability;

pub use euler::{ForwardEuler, SimulationState};
pub use result::{PeriodStats, Sample, SimulationResult};
pub use simulator::{SimulationConfig, Simulator};
pub use stability::{check_step_size, max_stable_step};

use crate::design::ConverterSpec;
use crate::error::Result;

/// Default simulated duration (s).
pub const DEFAULT_DURATION: f64 = 10e-3;

/// Default integration steps per switching period.
pub const DEFAULT_STEPS_PER_PERIOD: usize = 200;

/// Below this many steps per period a warning is logged.
pub const RECOMMENDED_STEPS_PER_PERIOD: usize = 100;

/// Hard lower bound on steps per switching period.
pub const MIN_STEPS_PER_PERIOD: usize = 10;

/// Largest accepted dt as a fraction of the fastest circuit time constant.
pub const STABILITY_FACTOR: f64 = 0.1;

/// Upper bound on the number of samples in one result.
pub const MAX_SAMPLES: usize = 50_000_000;

/// Derive, check and simulate a specification in one call.
pub fn simulate(spec: &ConverterSpec, config: SimulationConfig) -> Result<SimulationResult> {
    Simulator::from_spec(spec, config)?.run()
}
