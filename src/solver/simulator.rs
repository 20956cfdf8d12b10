//! Main simulator interface.

use tracing::{debug, info, info_span};

use crate::design::{derive_parameters, ConverterSpec, DerivedParameters};
use crate::error::{ConverterError, Result};
use crate::switching::SwitchModel;

use super::stability::check_step_size;
use super::{
    ForwardEuler, Sample, SimulationResult, SimulationState, DEFAULT_DURATION,
    DEFAULT_STEPS_PER_PERIOD, MAX_SAMPLES,
};

/// Configuration for a transient run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Total simulated time (s).
    pub duration: f64,
    /// Integration steps per switching period; dt = Ts / steps_per_period.
    pub steps_per_period: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            steps_per_period: DEFAULT_STEPS_PER_PERIOD,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration for the given duration with the default resolution.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Set the number of integration steps per switching period.
    ///
    /// At least 100 is recommended; 200-300 resolves the ripple well.
    pub fn with_steps_per_period(mut self, steps_per_period: usize) -> Self {
        self.steps_per_period = steps_per_period;
        self
    }

    /// Set the total simulated time.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConverterError::invalid_param(format!(
                "duration must be a positive finite number (got {})",
                self.duration
            )));
        }
        if self.steps_per_period == 0 {
            return Err(ConverterError::invalid_param(
                "steps per period must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Number of steps needed to cover `duration`.
///
/// Durations that are an exact multiple of `dt` up to rounding do not gain
/// an extra step.
fn step_count(duration: f64, dt: f64) -> f64 {
    let raw = duration / dt;
    (raw * (1.0 - 1e-12)).ceil()
}

/// The transient converter simulator.
///
/// Owns the time grid and the component models for one design. Each call to
/// [`Simulator::run`] starts from a discharged converter and produces an
/// independent [`SimulationResult`].
#[derive(Debug, Clone)]
pub struct Simulator {
    params: DerivedParameters,
    switch: SwitchModel,
    integrator: ForwardEuler,
    steps_per_period: usize,
    num_steps: usize,
}

impl Simulator {
    /// Create a simulator for already derived parameters.
    ///
    /// Fails before anything is simulated if the configuration is invalid or
    /// the resulting step size is unstable for the design.
    pub fn new(params: DerivedParameters, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let dt = params.switching_period / config.steps_per_period as f64;
        check_step_size(&params, dt)?;

        let steps = step_count(config.duration, dt);
        if steps + 1.0 > MAX_SAMPLES as f64 {
            return Err(ConverterError::invalid_param(format!(
                "run of {} s at dt = {dt:.3e} s needs {steps} steps, more than the {MAX_SAMPLES} sample limit",
                config.duration
            )));
        }

        Ok(Self {
            params,
            switch: SwitchModel::from_params(&params),
            integrator: ForwardEuler::from_params(&params, dt),
            steps_per_period: config.steps_per_period,
            num_steps: steps as usize,
        })
    }

    /// Derive parameters from a specification and create a simulator for them.
    pub fn from_spec(spec: &ConverterSpec, config: SimulationConfig) -> Result<Self> {
        let params = derive_parameters(spec)?;
        Self::new(params, config)
    }

    pub fn params(&self) -> &DerivedParameters {
        &self.params
    }

    /// Integration time step (s).
    pub fn dt(&self) -> f64 {
        self.integrator.dt()
    }

    /// Number of integration steps in a run.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Run the simulation from iL = vO = 0 at t = 0.
    pub fn run(&self) -> Result<SimulationResult> {
        let _span = info_span!(
            "transient_simulation",
            topology = %self.params.topology,
            steps = self.num_steps,
            dt = self.dt()
        )
        .entered();

        let dt = self.dt();
        let mut state = SimulationState::initial();
        let mut samples = Vec::with_capacity(self.num_steps + 1);

        for k in 0..self.num_steps {
            samples.push(Sample::from(state));

            let v_l = self.switch.inductor_voltage(state.time, state.output_voltage);
            self.integrator.advance(&mut state, v_l);
            state.time = (k + 1) as f64 * dt;

            if !state.is_finite() {
                let value = if state.inductor_current.is_finite() {
                    state.output_voltage
                } else {
                    state.inductor_current
                };
                return Err(ConverterError::NumericalOverflow {
                    time: state.time,
                    value,
                });
            }
        }
        samples.push(Sample::from(state));

        let result = SimulationResult::new(
            samples,
            self.params.reference_output_voltage(),
            self.steps_per_period,
        );

        let stats = result.final_period_stats();
        info!(
            mean_output_voltage = stats.mean_output_voltage,
            reference = result.reference_output_voltage(),
            mean_inductor_current = stats.mean_inductor_current,
            "simulation finished"
        );
        debug!(samples = result.len(), "result buffer filled");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Preset;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_count_tolerates_rounding() {
        let dt = (1.0 / 25e3) / 300.0;
        assert_eq!(step_count(8e-3, dt), 60000.0);
        assert_eq!(step_count(8e-3 + 0.5 * dt, dt), 60001.0);
    }

    #[test]
    fn test_grid_and_initial_sample() {
        let sim = Simulator::from_spec(
            &Preset::Buck.spec(),
            SimulationConfig::new(1e-3).with_steps_per_period(100),
        )
        .unwrap();
        let result = sim.run().unwrap();

        assert_eq!(result.len(), sim.num_steps() + 1);
        assert_eq!(sim.num_steps(), 2500);

        let first = result.samples()[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.inductor_current, 0.0);
        assert_eq!(first.output_voltage, 0.0);

        let last = result.samples()[result.len() - 1];
        assert_relative_eq!(last.time, 2500.0 * sim.dt(), max_relative = 1e-12);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let sim = Simulator::from_spec(&Preset::Boost.spec(), SimulationConfig::new(1e-3)).unwrap();
        let a = sim.run().unwrap();
        let b = sim.run().unwrap();
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_rejects_bad_config() {
        let spec = Preset::Buck.spec();
        for config in [
            SimulationConfig::new(0.0),
            SimulationConfig::new(f64::NAN),
            SimulationConfig::new(1e-3).with_steps_per_period(0),
        ] {
            assert!(matches!(
                Simulator::from_spec(&spec, config),
                Err(ConverterError::InvalidSimulationParam { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_coarse_resolution() {
        let config = SimulationConfig::new(1e-3).with_steps_per_period(4);
        assert!(matches!(
            Simulator::from_spec(&Preset::Buck.spec(), config),
            Err(ConverterError::UnstableStepSize { .. })
        ));
    }

    #[test]
    fn test_first_step_charges_inductor() {
        let sim = Simulator::from_spec(&Preset::Buck.spec(), SimulationConfig::new(1e-4)).unwrap();
        let result = sim.run().unwrap();
        let second = result.samples()[1];
        // Switch conducts at t = 0: vL = Vin - 0
        assert_relative_eq!(second.inductor_current, 36.0 / 220e-6 * sim.dt(), max_relative = 1e-12);
        assert_eq!(second.output_voltage, 0.0);
    }

    #[test]
    fn test_non_finite_state_aborts_run() {
        let mut params = derive_parameters(&Preset::Buck.spec()).unwrap();
        params.input_voltage = f64::MAX;

        let sim = Simulator::new(params, SimulationConfig::new(1e-4)).unwrap();
        match sim.run() {
            Err(ConverterError::NumericalOverflow { time, value }) => {
                assert_relative_eq!(time, sim.dt(), max_relative = 1e-12);
                assert!(!value.is_finite());
            }
            other => panic!("expected NumericalOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_run_over_sample_limit() {
        // 1000 s at Ts/200 = 0.2 us is 5e9 steps
        let config = SimulationConfig::new(1e3);
        assert!(matches!(
            Simulator::from_spec(&Preset::Buck.spec(), config),
            Err(ConverterError::InvalidSimulationParam { .. })
        ));
    }
}
