//! chamberlib-core: Core traits, types, and error definitions for chamberlib.
//!
//! This crate defines the device-agnostic abstractions the chamberlib
//! drivers build on. Orchestration code (sweep and soak scripts, lab
//! automation) can depend on these types without pulling in a specific
//! controller driver.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`Error`] / [`Result`] -- error handling
//! - [`TemperatureUnits`], [`RampScale`], [`RampAction`], [`OutputState`],
//!   [`ControlLoop`] -- the typed command vocabulary

pub mod error;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use chamberlib_core::*`.
pub use error::{Error, Result};
pub use transport::Transport;
pub use types::{ControlLoop, OutputState, RampAction, RampScale, TemperatureUnits};
