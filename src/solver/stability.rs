//! Step size sanity check.
//!
//! Forward Euler has no error control. A step that is coarse compared to the
//! switching period misplaces the switching edges, and a step that is coarse
//! compared to the circuit's time constants lets the L-C tank grow without
//! bound. Both are rejected before the first step is taken.

use tracing::warn;

use crate::design::DerivedParameters;
use crate::error::{ConverterError, Result};

use super::{MIN_STEPS_PER_PERIOD, RECOMMENDED_STEPS_PER_PERIOD, STABILITY_FACTOR};

/// Largest time step accepted for a design.
///
/// `STABILITY_FACTOR * min(L/R, R*C, sqrt(L*C))`, further capped at
/// `Ts / MIN_STEPS_PER_PERIOD`.
pub fn max_stable_step(params: &DerivedParameters) -> f64 {
    let tau = params
        .inductive_time_constant()
        .min(params.capacitive_time_constant())
        .min(params.resonant_time_constant());

    (STABILITY_FACTOR * tau).min(params.switching_period / MIN_STEPS_PER_PERIOD as f64)
}

/// Check a time step against [`max_stable_step`]. The limit itself is accepted.
pub fn check_step_size(params: &DerivedParameters, dt: f64) -> Result<()> {
    let limit = max_stable_step(params);
    if !(dt > 0.0 && dt <= limit) {
        return Err(ConverterError::unstable_step(dt, limit));
    }

    let steps_per_period = params.switching_period / dt;
    if steps_per_period < RECOMMENDED_STEPS_PER_PERIOD as f64 {
        warn!(
            steps_per_period,
            recommended = RECOMMENDED_STEPS_PER_PERIOD,
            "coarse time step, switching edges will be resolved poorly"
        );
    }

    Ok(())
}
