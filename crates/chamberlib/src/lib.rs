//! # chamberlib -- Environmental Test Chamber Control
//!
//! `chamberlib` is an asynchronous Rust library for controlling
//! environmental test chambers driven by Watlow F4T process controllers
//! over Ethernet. It is designed for automated burn-in racks, thermal
//! characterization sweeps, and qualification test benches where
//! unattended, scriptable chamber control is essential.
//!
//! ## Quick Start
//!
//! Add `chamberlib` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chamberlib = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a chamber and read its temperature:
//!
//! ```no_run
//! use chamberlib::watlow::{F4tBuilder, models::f4t};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let chamber = F4tBuilder::new(f4t())
//!         .host("192.168.0.40")
//!         .connect()
//!         .await?;
//!
//!     println!("Connected: {}", chamber.identity());
//!     let temp = chamber.get_temperature().await?;
//!     println!("Chamber air: {:.2} {}", temp, chamber.units().await);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                    | Purpose                                     |
//! |--------------------------|---------------------------------------------|
//! | `chamberlib-core`        | [`Transport`] trait, shared types, errors   |
//! | `chamberlib-transport`   | TCP transport implementation                |
//! | `chamberlib-watlow`      | Watlow F4T SCPI-style protocol driver       |
//! | `chamberlib-test-harness`| Mock transports for testing                 |
//! | **`chamberlib`**         | This facade crate -- re-exports everything  |
//!
//! ## The `F4t` driver
//!
//! [`F4t`](watlow::F4t) is the chamber client. It provides async methods
//! for the controller's operations:
//!
//! - **Temperature**: [`get_temperature`](watlow::F4t::get_temperature),
//!   [`get_setpoint`](watlow::F4t::get_setpoint),
//!   [`set_setpoint`](watlow::F4t::set_setpoint)
//! - **Units**: [`refresh_units`](watlow::F4t::refresh_units),
//!   [`set_units`](watlow::F4t::set_units)
//! - **Ramping**: [`set_ramp_action`](watlow::F4t::set_ramp_action),
//!   [`set_ramp_rate`](watlow::F4t::set_ramp_rate)
//! - **Outputs**: [`is_output_on`](watlow::F4t::is_output_on),
//!   [`set_output`](watlow::F4t::set_output)
//! - **Profiles**: [`profiles`](watlow::F4t::profiles),
//!   [`run_profile`](watlow::F4t::run_profile)
//!
//! Commands are strictly serialized per connection; the driver may be
//! shared across tasks and will interleave whole exchanges, never bytes.
//!
//! ## Cascade chambers
//!
//! Chambers fitted with a part-temperature probe (cascade option) are
//! driven with `.cascade(true)` on the builder. The driver then uses the
//! controller's cascade command family for every operation and performs
//! the one-time cascade configuration during connect.

pub use chamberlib_core::*;

/// Watlow F4T protocol backend.
///
/// Provides [`F4t`](watlow::F4t) and [`F4tBuilder`](watlow::F4tBuilder)
/// for controlling F4T-based chambers over the newline-terminated
/// SCPI-style protocol on TCP port 5025.
pub mod watlow {
    pub use chamberlib_watlow::*;
}

/// Transport implementations.
///
/// Provides [`TcpTransport`](transport::TcpTransport), the shipped
/// [`Transport`] implementation. The builder constructs one internally;
/// reach for this module when managing the connection lifecycle yourself.
pub mod transport {
    pub use chamberlib_transport::*;
}
