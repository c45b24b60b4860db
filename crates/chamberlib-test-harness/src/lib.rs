//! chamberlib-test-harness: Mock transports and scripted servers for
//! testing chamberlib without chamber hardware.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the protocol and driver layers, and [`MockTcpServer`] for end-to-end
//! tests that exercise a real `TcpTransport` against a scripted peer.

pub mod mock_tcp;
pub mod mock_transport;

pub use mock_tcp::MockTcpServer;
pub use mock_transport::MockTransport;
