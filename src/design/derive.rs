//! Steady-state design equations.
//!
//! All relations assume an ideal, lossless converter in continuous
//! conduction mode:
//!
//! ```text
//! boost: Vout = Vin / (1 - D)     buck: Vout = D * Vin
//! Iout = Pout / Vout              Iin  = Pout / Vin
//! R    = Vout^2 / Pout
//! ```
//!
//! Ripple-driven sizing uses the peak-to-peak inductor current ripple
//! `dI = ripple_i * I_L` and output voltage ripple `dV = ripple_v * Vout`:
//!
//! ```text
//! boost: L = Vin * D / (Fs * dI)          C = Iout * D / (Fs * dV)
//! buck:  L = (Vin - Vout) * D / (Fs * dI)  C = dI / (8 * Fs * dV)
//! ```

use tracing::debug;

use crate::error::{ConverterError, Result};

use super::{
    validate_spec, ConverterSpec, DerivedParameters, Drive, Filter, Load, RippleTargets, Topology,
};

/// Derive duty cycle, currents, load and filter components from a specification.
///
/// Pure and deterministic: the same specification always yields the same
/// parameters. Fails with [`ConverterError::InvalidSpecification`] when the
/// specification violates its constraints.
pub fn derive_parameters(spec: &ConverterSpec) -> Result<DerivedParameters> {
    validate_spec(spec)?;

    let vin = spec.input_voltage;
    let fs = spec.switching_frequency;

    let (duty_cycle, output_voltage) = match (spec.topology, spec.drive) {
        (Topology::Boost, Drive::OutputVoltage(vout)) => ((vout - vin) / vout, vout),
        (Topology::Boost, Drive::DutyCycle(d)) => (d, vin / (1.0 - d)),
        (Topology::Buck, Drive::OutputVoltage(vout)) => (vout / vin, vout),
        (Topology::Buck, Drive::DutyCycle(d)) => (d, d * vin),
    };

    if !(duty_cycle > 0.0 && duty_cycle < 1.0) {
        return Err(ConverterError::invalid_spec(format!(
            "derived duty cycle {duty_cycle} lies outside (0, 1)"
        )));
    }

    let (output_power, load_resistance) = match spec.load {
        Load::Power(p) => (p, output_voltage * output_voltage / p),
        Load::Resistance(r) => (output_voltage * output_voltage / r, r),
    };
    let output_current = output_power / output_voltage;
    let input_current = output_power / vin;

    let (inductance, capacitance) = match spec.filter {
        Filter::Components {
            inductance,
            capacitance,
        } => (inductance, capacitance),
        Filter::Ripple { current, voltage } => match spec.topology {
            Topology::Boost => (
                vin * duty_cycle / (fs * current * input_current),
                output_current * duty_cycle / (fs * voltage * output_voltage),
            ),
            Topology::Buck => {
                let delta_i = current * output_current;
                (
                    (vin - output_voltage) * duty_cycle / (fs * delta_i),
                    delta_i / (8.0 * fs * voltage * output_voltage),
                )
            }
        },
    };

    let params = DerivedParameters {
        topology: spec.topology,
        input_voltage: vin,
        duty_cycle,
        switching_frequency: fs,
        switching_period: 1.0 / fs,
        output_voltage,
        output_current,
        input_current,
        output_power,
        load_resistance,
        inductance,
        capacitance,
        ripple_targets: match spec.filter {
            Filter::Ripple { current, voltage } => Some(RippleTargets { current, voltage }),
            Filter::Components { .. } => None,
        },
    };
    check_derived(&params)?;

    debug!(
        topology = %params.topology,
        duty_cycle = params.duty_cycle,
        output_voltage = params.output_voltage,
        load_resistance = params.load_resistance,
        inductance = params.inductance,
        capacitance = params.capacitance,
        "derived converter parameters"
    );

    Ok(params)
}

/// Reject values that overflowed or collapsed to zero during derivation.
fn check_derived(params: &DerivedParameters) -> Result<()> {
    let values = [
        ("output voltage", params.output_voltage),
        ("output current", params.output_current),
        ("input current", params.input_current),
        ("load resistance", params.load_resistance),
        ("inductance", params.inductance),
        ("capacitance", params.capacitance),
    ];
    for (name, value) in values {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConverterError::invalid_spec(format!(
                "derived {name} is not a positive finite number ({value})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn boost(vout: f64) -> ConverterSpec {
        ConverterSpec::new(
            Topology::Boost,
            100.0,
            Drive::OutputVoltage(vout),
            50e3,
            Load::Power(800.0),
            Filter::Ripple {
                current: 0.15,
                voltage: 0.015,
            },
        )
    }

    #[test]
    fn test_boost_reference_values() {
        let p = derive_parameters(&boost(250.0)).unwrap();
        assert_relative_eq!(p.duty_cycle, 0.6, epsilon = 1e-12);
        assert_relative_eq!(p.output_current, 3.2, epsilon = 1e-12);
        assert_relative_eq!(p.input_current, 8.0, epsilon = 1e-12);
        assert_relative_eq!(p.load_resistance, 78.125, epsilon = 1e-9);
        assert_relative_eq!(p.inductance, 1e-3, max_relative = 1e-12);
        assert_relative_eq!(p.capacitance, 10.24e-6, max_relative = 1e-12);
        assert_relative_eq!(p.switching_period, 20e-6, max_relative = 1e-12);
        assert_relative_eq!(p.target_inductor_current_ripple().unwrap(), 1.2, max_relative = 1e-12);
        assert_relative_eq!(p.target_output_voltage_ripple().unwrap(), 3.75, max_relative = 1e-12);
    }

    #[test]
    fn test_boost_rejects_step_down() {
        for vout in [50.0, 100.0] {
            let err = derive_parameters(&boost(vout)).unwrap_err();
            assert!(matches!(err, ConverterError::InvalidSpecification { .. }));
        }
    }

    #[test]
    fn test_boost_from_duty_cycle() {
        let mut spec = boost(250.0);
        spec.drive = Drive::DutyCycle(0.6);
        let p = derive_parameters(&spec).unwrap();
        assert_relative_eq!(p.output_voltage, 250.0, max_relative = 1e-12);
    }

    #[test]
    fn test_buck_direct_components() {
        let spec = ConverterSpec::new(
            Topology::Buck,
            36.0,
            Drive::DutyCycle(0.5),
            25e3,
            Load::Resistance(2.16),
            Filter::Components {
                inductance: 220e-6,
                capacitance: 56e-6,
            },
        );
        let p = derive_parameters(&spec).unwrap();
        assert_relative_eq!(p.output_voltage, 18.0, epsilon = 1e-12);
        assert_relative_eq!(p.output_power, 150.0, max_relative = 1e-12);
        assert_relative_eq!(p.output_current, 18.0 / 2.16, max_relative = 1e-12);
        assert_relative_eq!(p.input_current, 150.0 / 36.0, max_relative = 1e-12);
        assert_eq!(p.inductance, 220e-6);
        assert_eq!(p.capacitance, 56e-6);
        assert_eq!(p.ripple_targets, None);
        assert_relative_eq!(p.reference_inductor_current(), p.output_current);
    }

    #[test]
    fn test_buck_ripple_sizing() {
        let spec = ConverterSpec::new(
            Topology::Buck,
            48.0,
            Drive::OutputVoltage(12.0),
            100e3,
            Load::Power(60.0),
            Filter::Ripple {
                current: 0.2,
                voltage: 0.01,
            },
        );
        let p = derive_parameters(&spec).unwrap();
        // Iout = 5 A, dI = 1 A, D = 0.25
        assert_relative_eq!(p.duty_cycle, 0.25, epsilon = 1e-12);
        assert_relative_eq!(p.inductance, 36.0 * 0.25 / 100e3, max_relative = 1e-12);
        assert_relative_eq!(p.capacitance, 1.0 / (8.0 * 100e3 * 0.12), max_relative = 1e-12);
    }

    #[test]
    fn test_buck_rejects_duty_above_one() {
        let spec = ConverterSpec::new(
            Topology::Buck,
            36.0,
            Drive::DutyCycle(1.2),
            25e3,
            Load::Resistance(2.16),
            Filter::Components {
                inductance: 220e-6,
                capacitance: 56e-6,
            },
        );
        assert!(matches!(
            derive_parameters(&spec),
            Err(ConverterError::InvalidSpecification { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn derivation_is_deterministic(
            vin in 1.0_f64..400.0,
            ratio in 1.01_f64..10.0,
            power in 1.0_f64..5000.0,
            fs in 1e3_f64..1e6,
        ) {
            let spec = ConverterSpec::new(
                Topology::Boost,
                vin,
                Drive::OutputVoltage(vin * ratio),
                fs,
                Load::Power(power),
                Filter::Ripple { current: 0.2, voltage: 0.01 },
            );
            let first = derive_parameters(&spec).unwrap();
            let second = derive_parameters(&spec).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn boost_duty_cycle_is_bounded(
            vin in 1.0_f64..400.0,
            vout in 1.0_f64..2000.0,
        ) {
            let spec = ConverterSpec::new(
                Topology::Boost,
                vin,
                Drive::OutputVoltage(vout),
                50e3,
                Load::Power(100.0),
                Filter::Ripple { current: 0.15, voltage: 0.015 },
            );
            match derive_parameters(&spec) {
                Ok(p) => {
                    prop_assert!(vout > vin);
                    prop_assert!(p.duty_cycle > 0.0 && p.duty_cycle < 1.0);
                }
                Err(e) => {
                    prop_assert!(vout <= vin);
                    let is_invalid_spec = matches!(e, ConverterError::InvalidSpecification { .. });
                    prop_assert!(is_invalid_spec);
                }
            }
        }
    }
}
