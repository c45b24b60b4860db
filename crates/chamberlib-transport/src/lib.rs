//! Transport implementations for chamberlib.
//!
//! This crate provides the concrete implementation of the
//! [`Transport`](chamberlib_core::Transport) trait from `chamberlib-core`:
//!
//! - [`TcpTransport`]: TCP connections to the controller's SCPI command
//!   port (5025 on the Watlow F4T)
//!
//! # Example
//!
//! ```no_run
//! use chamberlib_transport::TcpTransport;
//! use chamberlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> chamberlib_core::Result<()> {
//! let mut transport = TcpTransport::connect("192.168.0.40:5025").await?;
//! transport.send(b"*IDN?\n").await?;
//!
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod tcp;

pub use tcp::TcpTransport;
