//! Simulation output.

use super::SimulationState;

/// One point of the simulated waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time (s)
    pub time: f64,
    /// Inductor current (A)
    pub inductor_current: f64,
    /// Output voltage (V)
    pub output_voltage: f64,
}

impl From<SimulationState> for Sample {
    fn from(state: SimulationState) -> Self {
        Self {
            time: state.time,
            inductor_current: state.inductor_current,
            output_voltage: state.output_voltage,
        }
    }
}

/// Averages and peak-to-peak ripple over one switching period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodStats {
    pub mean_output_voltage: f64,
    pub output_voltage_ripple: f64,
    pub mean_inductor_current: f64,
    pub inductor_current_ripple: f64,
}

/// The full time series of one run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    samples: Vec<Sample>,
    reference_output_voltage: f64,
    steps_per_period: usize,
}

impl SimulationResult {
    /// `samples` must hold at least the initial state.
    pub(crate) fn new(
        samples: Vec<Sample>,
        reference_output_voltage: f64,
        steps_per_period: usize,
    ) -> Self {
        debug_assert!(!samples.is_empty());
        Self {
            samples,
            reference_output_voltage,
            steps_per_period,
        }
    }

    /// All samples in time order. There is one more sample than steps.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nominal output voltage to overlay on the waveform.
    pub fn reference_output_voltage(&self) -> f64 {
        self.reference_output_voltage
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }

    pub fn inductor_currents(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.inductor_current)
    }

    pub fn output_voltages(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.output_voltage)
    }

    /// The last switching period of the run (or the whole run if shorter).
    pub fn final_period(&self) -> &[Sample] {
        let start = self.samples.len().saturating_sub(self.steps_per_period);
        &self.samples[start..]
    }

    /// Steady-state averages and ripple over the final switching period.
    ///
    /// A run always records its initial state, so the window is never empty.
    pub fn final_period_stats(&self) -> PeriodStats {
        let window = self.final_period();
        let n = window.len() as f64;
        let (mut v_sum, mut v_min, mut v_max) = (0.0, f64::INFINITY, f64::NEG_INFINITY);
        let (mut i_sum, mut i_min, mut i_max) = (0.0, f64::INFINITY, f64::NEG_INFINITY);
        for s in window {
            v_sum += s.output_voltage;
            v_min = v_min.min(s.output_voltage);
            v_max = v_max.max(s.output_voltage);
            i_sum += s.inductor_current;
            i_min = i_min.min(s.inductor_current);
            i_max = i_max.max(s.inductor_current);
        }

        PeriodStats {
            mean_output_voltage: v_sum / n,
            output_voltage_ripple: v_max - v_min,
            mean_inductor_current: i_sum / n,
            inductor_current_ripple: i_max - i_min,
        }
    }

    /// Largest |vO| over the run.
    pub fn max_abs_output_voltage(&self) -> f64 {
        self.output_voltages().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Largest |iL| over the run.
    pub fn max_abs_inductor_current(&self) -> f64 {
        self.inductor_currents().fold(0.0_f64, |m, i| m.max(i.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize, steps_per_period: usize) -> SimulationResult {
        let samples = (0..n)
            .map(|k| Sample {
                time: k as f64,
                inductor_current: -(k as f64),
                output_voltage: k as f64,
            })
            .collect();
        SimulationResult::new(samples, 1.0, steps_per_period)
    }

    #[test]
    fn test_final_period_window() {
        let result = ramp(10, 4);
        let window = result.final_period();
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].time, 6.0);

        let stats = result.final_period_stats();
        assert_relative_eq!(stats.mean_output_voltage, 7.5);
        assert_relative_eq!(stats.output_voltage_ripple, 3.0);
        assert_relative_eq!(stats.mean_inductor_current, -7.5);
    }

    #[test]
    fn test_short_run_uses_everything() {
        let result = ramp(3, 10);
        assert_eq!(result.final_period().len(), 3);
    }

    #[test]
    fn test_single_sample_stats() {
        let stats = ramp(1, 4).final_period_stats();
        assert_eq!(stats.mean_output_voltage, 0.0);
        assert_eq!(stats.output_voltage_ripple, 0.0);
        assert_eq!(stats.inductor_current_ripple, 0.0);
    }

    #[test]
    fn test_extremes() {
        let result = ramp(5, 2);
        assert_eq!(result.max_abs_output_voltage(), 4.0);
        assert_eq!(result.max_abs_inductor_current(), 4.0);
    }
}
