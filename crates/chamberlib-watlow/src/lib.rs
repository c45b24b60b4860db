//! Watlow F4T backend for chamberlib.
//!
//! This crate implements the SCPI-style ASCII protocol spoken by Watlow
//! F4T process controllers, the brains of most modern environmental test
//! chambers (TestEquity, Thermotron retrofits, and others). It provides:
//!
//! - **Protocol codec** ([`protocol`]) -- encode and decode
//!   newline-terminated command and response lines.
//! - **Command builders** ([`commands`]) -- construct correctly-formatted
//!   commands for temperature, setpoint, ramp, output, and profile
//!   operations, and parse the corresponding replies.
//! - **Firmware dialects** ([`models`]) -- per-firmware command paths
//!   where F4T generations diverge.
//! - **Controller driver** ([`controller`]) -- the [`F4t`] client with
//!   transport abstraction, response deadlines, settling delays, and
//!   cascade-mode support.
//! - **Builder** ([`builder`]) -- fluent builder API for connecting to a
//!   chamber with smart defaults.
//!
//! # Direct vs cascade control
//!
//! A plain chamber regulates on its air sensor through control loop 1
//! (`CLOOP` commands). Chambers fitted with the cascade option pair the
//! air sensor with a part-temperature probe and use a distinct command
//! family (`CASCADE`). Which family a client speaks is chosen once, at
//! build time, and never mixed.
//!
//! # Example
//!
//! ```
//! use chamberlib_watlow::protocol::{encode_command, decode_line, DecodeResult};
//! use chamberlib_watlow::commands::{cmd_query_temperature, parse_float_reply};
//! use chamberlib_core::ControlLoop;
//!
//! // Build a "read chamber temperature" query
//! let cmd = cmd_query_temperature(ControlLoop::ONE, false);
//! assert_eq!(cmd, b":SOURCE:CLOOP1:PVALUE?\n");
//!
//! // Simulate receiving a reply from the controller
//! if let DecodeResult::Line { text, .. } = decode_line(b"24.97\n") {
//!     let temp = parse_float_reply(&text).unwrap();
//!     assert!((temp - 24.97).abs() < f64::EPSILON);
//! }
//! ```

pub mod builder;
pub mod commands;
pub mod controller;
pub mod models;
pub mod protocol;

// Re-export the primary types for ergonomic `use chamberlib_watlow::*`.
pub use builder::F4tBuilder;
pub use controller::F4t;
pub use models::F4tModel;
