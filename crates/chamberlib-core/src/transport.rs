//! Transport trait for chamber controller communication.
//!
//! The [`Transport`] trait abstracts over the byte stream to a controller.
//! The shipped implementation is TCP ([`TcpTransport`] in
//! `chamberlib-transport`); `MockTransport` from `chamberlib-test-harness`
//! implements the same trait for deterministic unit testing.
//!
//! Protocol engines (the F4T line codec and command layer in
//! `chamberlib-watlow`) operate on a `Transport` rather than directly on a
//! socket, so the same command code runs against real chambers and mocks.
//!
//! # Single in-flight exchange
//!
//! The wire protocol has no correlation mechanism: commands are processed
//! in send order and responses arrive in the same order. Callers must hold
//! exclusive access to a transport for the full duration of one
//! command/response exchange. The drivers enforce this by wrapping the
//! transport in a `tokio::sync::Mutex`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a chamber controller.
///
/// Implementations handle the physical connection only. Framing (newline
/// delimiters, text decoding) is handled by the protocol layer that
/// consumes this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the controller.
    ///
    /// Implementations should not return until all bytes have been handed
    /// to the underlying stream.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the controller into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Waits up to `timeout`
    /// for data to arrive; returns
    /// [`Error::Timeout`](crate::error::Error::Timeout) if nothing is
    /// received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// Idempotent: closing an already-closed transport is a no-op. After
    /// `close()`, subsequent `send()` and `receive()` calls return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
