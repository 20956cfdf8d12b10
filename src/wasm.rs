//! WASM bindings for Converter Core.
//!
//! This module provides JavaScript-friendly bindings so a browser page can
//! run a design and plot the waveform itself.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmConverterSim } from 'converter_core';
//!
//! await init();
//!
//! const design = `
//! converter:
//!   topology: buck
//!   input_voltage: 36.0
//!   duty_cycle: 0.5
//!   switching_frequency: 25000.0
//!   load_resistance: 2.16
//!   inductance: 0.00022
//!   capacitance: 0.000056
//! simulation:
//!   duration: 0.008
//!   steps_per_period: 300
//! `;
//!
//! const sim = new WasmConverterSim(design);
//! plot(sim.times(), sim.output_voltages(), sim.reference_output_voltage);
//! ```

use wasm_bindgen::prelude::*;

use crate::config::parse_design;
use crate::design::{derive_parameters, DerivedParameters};
use crate::error::ConverterError;
use crate::solver::{SimulationResult, Simulator};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: ConverterError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A finished converter simulation, exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmConverterSim {
    params: DerivedParameters,
    result: SimulationResult,
}

#[wasm_bindgen]
impl WasmConverterSim {
    /// Parse a YAML design, derive its parameters and run the simulation.
    ///
    /// # Arguments
    /// * `design_yaml` - The design in the YAML design-file format
    ///
    /// # Returns
    /// The finished simulation, or an error message if the design is invalid
    /// or the step size is unstable.
    #[wasm_bindgen(constructor)]
    pub fn new(design_yaml: &str) -> Result<WasmConverterSim, JsValue> {
        let design = parse_design(design_yaml).map_err(to_js)?;
        let params = derive_parameters(&design.spec).map_err(to_js)?;
        let result = Simulator::new(params, design.simulation)
            .and_then(|sim| sim.run())
            .map_err(to_js)?;

        Ok(WasmConverterSim { params, result })
    }

    /// Sample times in seconds.
    #[wasm_bindgen]
    pub fn times(&self) -> Vec<f64> {
        self.result.times().collect()
    }

    /// Inductor current samples in amperes.
    #[wasm_bindgen]
    pub fn inductor_currents(&self) -> Vec<f64> {
        self.result.inductor_currents().collect()
    }

    /// Output voltage samples in volts.
    #[wasm_bindgen]
    pub fn output_voltages(&self) -> Vec<f64> {
        self.result.output_voltages().collect()
    }

    /// Nominal output voltage for the overlay line.
    #[wasm_bindgen(getter)]
    pub fn reference_output_voltage(&self) -> f64 {
        self.result.reference_output_voltage()
    }

    #[wasm_bindgen(getter)]
    pub fn duty_cycle(&self) -> f64 {
        self.params.duty_cycle
    }

    #[wasm_bindgen(getter)]
    pub fn inductance(&self) -> f64 {
        self.params.inductance
    }

    #[wasm_bindgen(getter)]
    pub fn capacitance(&self) -> f64 {
        self.params.capacitance
    }

    /// The plain-text parameter report.
    #[wasm_bindgen]
    pub fn report(&self) -> String {
        self.params.to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
