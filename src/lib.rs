//! # Converter Core
//!
//! Component sizing and transient simulation for switched-mode DC-DC
//! converters.
//!
//! This library provides:
//! - Steady-state design equations for buck and boost converters
//! - An open-loop switch model with one power stage per topology
//! - A cycle-resolved forward Euler simulation of inductor current and output voltage
//! - YAML design files, CSV waveform export and a plain-text report
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`design`] - Converter specification and parameter derivation
//! - [`switching`] - Switch schedule and per-topology inductor voltage
//! - [`solver`] - Forward Euler integrator, step-size check and simulation driver
//! - [`config`] - YAML design files
//! - [`output`] - Report and CSV export
//! - [`sweep`] - Parallel parameter sweeps (`parallel` feature)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! convsim --preset boost --csv boost.csv
//! convsim design.yaml --steps-per-period 300
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use converter_core::{derive_parameters, Preset, Simulator};
//!
//! let params = derive_parameters(&Preset::Boost.spec())?;
//! let result = Simulator::new(params, Preset::Boost.simulation())?.run()?;
//! println!("{:?}", result.final_period_stats());
//! # Ok::<(), converter_core::ConverterError>(())
//! ```
//!
//! ## Simulation Method
//!
//! For each time step dt = Ts / N:
//!
//! 1. Find the switch state from the position within the switching period
//! 2. Ask the topology's power stage for the inductor voltage
//! 3. Advance inductor current and output voltage with forward Euler
//!
//! The step is checked against the switching period and the circuit time
//! constants before the first step, since forward Euler has no error control.

pub mod config;
pub mod design;
pub mod error;
pub mod output;
pub mod solver;
pub mod switching;

#[cfg(feature = "parallel")]
pub mod sweep;

// Re-export main types for convenience
pub use design::{derive_parameters, ConverterSpec, DerivedParameters, Preset, Topology};
pub use error::{ConverterError, Result};
pub use solver::{simulate, SimulationConfig, SimulationResult, Simulator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmConverterSim;
