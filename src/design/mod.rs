//! Converter specification and steady-state parameter derivation.
//!
//! A [`ConverterSpec`] describes what the designer asks for: topology, input
//! voltage, either an output voltage or a duty cycle, the load, and either
//! ripple targets or explicit filter components. [`derive_parameters`] turns
//! it into the [`DerivedParameters`] the simulator consumes.

mod derive;
mod presets;
mod types;
mod validate;

pub use derive::derive_parameters;
pub use presets::Preset;
pub use types::*;
pub use validate::validate_spec;
