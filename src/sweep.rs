//! Parallel parameter sweeps.
//!
//! Every run is independent, so a sweep is just a parallel map over the
//! specifications. Results come back in input order.

use rayon::prelude::*;
use tracing::info_span;

use crate::design::{ConverterSpec, DerivedParameters};
use crate::error::Result;
use crate::solver::{PeriodStats, SimulationConfig, Simulator};

/// Summary of one sweep point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub params: DerivedParameters,
    pub steady_state: PeriodStats,
    pub max_abs_output_voltage: f64,
    pub max_abs_inductor_current: f64,
}

fn run_point(spec: &ConverterSpec, config: SimulationConfig) -> Result<SweepPoint> {
    let simulator = Simulator::from_spec(spec, config)?;
    let result = simulator.run()?;

    Ok(SweepPoint {
        params: *simulator.params(),
        steady_state: result.final_period_stats(),
        max_abs_output_voltage: result.max_abs_output_voltage(),
        max_abs_inductor_current: result.max_abs_inductor_current(),
    })
}

/// Simulate each specification with the same run configuration.
///
/// A failing point does not stop the others; its error is returned in its slot.
pub fn run_sweep(specs: &[ConverterSpec], config: &SimulationConfig) -> Vec<Result<SweepPoint>> {
    let _span = info_span!("parameter_sweep", points = specs.len()).entered();
    let config = *config;
    specs
        .par_iter()
        .map(|spec| run_point(spec, config))
        .collect()
}
