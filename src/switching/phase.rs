//! Position within the switching period.

/// Discrete operating state of the main switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    /// Switch closed, for the first `D * Ts` of every period
    Conducting,
    /// Switch open, for the remainder of the period
    NonConducting,
}

impl SwitchState {
    pub fn is_conducting(self) -> bool {
        matches!(self, SwitchState::Conducting)
    }
}

/// Time elapsed since the start of the current switching period.
pub fn cycle_time(t: f64, period: f64) -> f64 {
    t.rem_euclid(period)
}

/// Switch state at time `t` for a fixed open-loop schedule.
///
/// Conducting while `t mod Ts < D * Ts`, non-conducting otherwise. The
/// schedule restarts at every period boundary.
pub fn switch_state(t: f64, period: f64, duty_cycle: f64) -> SwitchState {
    if cycle_time(t, period) < duty_cycle * period {
        SwitchState::Conducting
    } else {
        SwitchState::NonConducting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: f64 = 40e-6;

    #[test]
    fn test_transitions_within_one_period() {
        assert_eq!(switch_state(0.0, TS, 0.5), SwitchState::Conducting);
        assert_eq!(switch_state(0.49 * TS, TS, 0.5), SwitchState::Conducting);
        assert_eq!(switch_state(0.5 * TS, TS, 0.5), SwitchState::NonConducting);
        assert_eq!(switch_state(0.99 * TS, TS, 0.5), SwitchState::NonConducting);
    }

    #[test]
    fn test_wraps_at_period_boundary() {
        assert_eq!(switch_state(1.01 * TS, TS, 0.5), SwitchState::Conducting);
        assert_eq!(switch_state(3.7 * TS, TS, 0.5), SwitchState::NonConducting);
    }

    #[test]
    fn test_cycle_time_is_within_period() {
        let tc = cycle_time(2.25 * TS, TS);
        assert!((tc - 0.25 * TS).abs() < 1e-15);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn state_repeats_every_period(
            t in 0.0_f64..1e-2,
            periods in 1u32..500,
            duty in 0.05_f64..0.95,
            fs in 1e3_f64..2e5,
        ) {
            let ts = 1.0 / fs;
            let shifted = t + f64::from(periods) * ts;

            // Rounding may move a sample across the switching edge only when it
            // sits within a few ulps of it.
            let edge_gap = |x: f64| {
                let tc = cycle_time(x, ts);
                (tc - duty * ts).abs().min(tc).min(ts - tc)
            };
            prop_assume!(edge_gap(t) > 1e-9 * ts && edge_gap(shifted) > 1e-9 * ts);

            prop_assert_eq!(switch_state(t, ts, duty), switch_state(shifted, ts, duty));
        }
    }
}
