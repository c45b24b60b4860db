//! Mock TCP server for end-to-end protocol testing.
//!
//! [`MockTcpServer`] provides a lightweight TCP listener pre-loaded with
//! scripted responses, enabling deterministic testing of the full stack
//! (driver, framing, `TcpTransport`) without a chamber on the network.
//!
//! # Example
//!
//! ```
//! use chamberlib_test_harness::MockTcpServer;
//!
//! # async fn example() -> chamberlib_core::Result<()> {
//! let mut server = MockTcpServer::new().await?;
//!
//! // When the client sends the identity query, reply with an identity line.
//! server.expect(b"*IDN?\n", b"Watlow Electric, F4T, 1234, 4.05\n");
//!
//! // Get the address to connect a TcpTransport to
//! let addr = server.addr();
//! // ... connect and test ...
//! # Ok(())
//! # }
//! ```

use chamberlib_core::error::{Error, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A pre-loaded request/response pair for the mock TCP server.
#[derive(Debug, Clone)]
struct TcpExpectation {
    /// The exact bytes we expect the client to send.
    request: Vec<u8>,
    /// The bytes to send back when the matching request is received.
    response: Vec<u8>,
}

/// A mock TCP server for testing the driver stack over a real socket.
///
/// The server listens on a random available port on localhost. Once
/// started, it accepts a single connection and processes expectations in
/// order: for each expected request it reads exactly that many bytes from
/// the client, verifies them, and writes back the corresponding response.
/// An empty response means the server stays silent for that exchange, the
/// way the chamber does for silently-applied writes.
///
/// If the client sends data that does not match the next expectation, the
/// server task finishes with an error which [`wait`](MockTcpServer::wait)
/// reports.
pub struct MockTcpServer {
    /// The address the server is listening on (e.g., "127.0.0.1:54321").
    addr: String,
    /// Ordered queue of expected request/response pairs.
    expectations: VecDeque<TcpExpectation>,
    /// Handle to the server task once started.
    server_handle: Option<JoinHandle<std::result::Result<(), String>>>,
}

impl MockTcpServer {
    /// Create a new mock TCP server listening on a random port.
    ///
    /// The server does not accept connections until started, allowing
    /// expectations to be loaded first.
    pub async fn new() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| Error::Transport(format!("failed to bind mock TCP server: {e}")))?;
        let addr = listener.local_addr().map_err(Error::Io)?.to_string();

        Ok(Self {
            addr,
            expectations: VecDeque::new(),
            server_handle: None,
        })
    }

    /// Add an expected request/response pair.
    ///
    /// Expectations are consumed in order. When the connected client sends
    /// bytes matching `request`, the server replies with `response`.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.expectations.push_back(TcpExpectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Get the address the server is listening on.
    ///
    /// Use this to connect a `TcpTransport` to the mock server.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Start the server and return a channel that signals when the
    /// listener is ready to accept connections.
    ///
    /// This avoids race conditions where the client tries to connect
    /// before the server has re-bound to the port.
    pub fn start_with_ready(&mut self) -> oneshot::Receiver<()> {
        let addr = self.addr.clone();
        let expectations: Vec<TcpExpectation> = self.expectations.drain(..).collect();
        let (ready_tx, ready_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let listener = TcpListener::bind(&addr)
                .await
                .map_err(|e| format!("failed to re-bind mock TCP server on {addr}: {e}"))?;

            // Signal that the listener is ready
            let _ = ready_tx.send(());

            let (mut stream, _) = listener
                .accept()
                .await
                .map_err(|e| format!("failed to accept connection: {e}"))?;

            for (i, expectation) in expectations.iter().enumerate() {
                let mut buf = vec![0u8; expectation.request.len()];
                let mut total_read = 0;

                // Read exactly the expected number of bytes
                while total_read < expectation.request.len() {
                    let n = stream
                        .read(&mut buf[total_read..])
                        .await
                        .map_err(|e| format!("expectation {i}: read error: {e}"))?;
                    if n == 0 {
                        return Err(format!(
                            "expectation {}: client disconnected after {} bytes (expected {})",
                            i,
                            total_read,
                            expectation.request.len()
                        ));
                    }
                    total_read += n;
                }

                if buf != expectation.request {
                    return Err(format!(
                        "expectation {}: request mismatch: expected {:?}, got {:?}",
                        i,
                        String::from_utf8_lossy(&expectation.request),
                        String::from_utf8_lossy(&buf)
                    ));
                }

                if !expectation.response.is_empty() {
                    stream
                        .write_all(&expectation.response)
                        .await
                        .map_err(|e| format!("expectation {i}: write error: {e}"))?;

                    stream
                        .flush()
                        .await
                        .map_err(|e| format!("expectation {i}: flush error: {e}"))?;
                }
            }

            Ok(())
        });

        self.server_handle = Some(handle);
        ready_rx
    }

    /// Wait for the server task to complete and return any errors.
    ///
    /// Call this after the client has finished its interactions to verify
    /// that all expectations were met.
    pub async fn wait(self) -> std::result::Result<(), String> {
        if let Some(handle) = self.server_handle {
            handle
                .await
                .map_err(|e| format!("server task panicked: {e}"))?
        } else {
            Ok(())
        }
    }
}
