//! TCP transport for chamber controller communication.
//!
//! This module provides [`TcpTransport`], which implements the
//! [`Transport`] trait for controllers reachable over Ethernet. Watlow F4T
//! controllers expose their SCPI-style command port on TCP 5025 (the
//! conventional instrument-control port).
//!
//! # Example
//!
//! ```no_run
//! use chamberlib_transport::TcpTransport;
//! use chamberlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> chamberlib_core::Result<()> {
//! // Connect to a chamber controller's SCPI port
//! let mut transport = TcpTransport::connect("192.168.0.40:5025").await?;
//!
//! // Send the identity query
//! transport.send(b"*IDN?\n").await?;
//!
//! // Receive the reply with a 1.5 second timeout
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_millis(1500)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chamberlib_core::error::{Error, Result};
use chamberlib_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Default connection timeout (5 seconds).
///
/// Chamber controllers sit on lab LANs; five seconds is generous for a
/// healthy link but short enough that a misconfigured address fails fast
/// instead of stalling a test sequence.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP transport for a network-connected chamber controller.
///
/// The connection is established eagerly via [`connect`](TcpTransport::connect)
/// or [`connect_with_timeout`](TcpTransport::connect_with_timeout). Close is
/// idempotent: the stream handle is consumed on the first `close()` and all
/// later calls are no-ops, so a transport handed between owning objects is
/// never double-closed.
#[derive(Debug)]
pub struct TcpTransport {
    /// The underlying TCP stream, `None` after `close()` is called.
    stream: Option<TcpStream>,
    /// The address string for logging/debugging.
    addr: String,
}

impl TcpTransport {
    /// Connect to a controller using the default timeout.
    ///
    /// The `addr` parameter is a `host:port` string, e.g.
    /// `"192.168.0.40:5025"`.
    pub async fn connect(addr: &str) -> Result<Self> {
        Self::connect_with_timeout(addr, DEFAULT_CONNECT_TIMEOUT).await
    }

    /// Connect to a controller with a specified timeout.
    ///
    /// # Arguments
    ///
    /// * `addr` - A `host:port` string (e.g. `"192.168.0.40:5025"`)
    /// * `timeout` - Maximum time to wait for the connection to be established
    pub async fn connect_with_timeout(addr: &str, timeout: Duration) -> Result<Self> {
        tracing::debug!(
            addr = %addr,
            timeout_ms = timeout.as_millis(),
            "Connecting to chamber controller"
        );

        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| {
                tracing::error!(addr = %addr, "TCP connection timed out");
                Error::Timeout
            })?
            .map_err(|e| {
                tracing::error!(addr = %addr, error = %e, "TCP connection failed");
                map_connect_error(e, addr)
            })?;

        // Disable Nagle's algorithm: command lines are tiny and each
        // exchange blocks the calling sequence until the reply arrives.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!(
                addr = %addr,
                error = %e,
                "Failed to set TCP_NODELAY (continuing anyway)"
            );
        }

        tracing::info!(addr = %addr, "Chamber controller connection established");

        Ok(Self {
            stream: Some(stream),
            addr: addr.to_string(),
        })
    }

    /// Wrap an already-connected `TcpStream` as a `TcpTransport`.
    ///
    /// Use this when the socket was established externally (e.g. accepted
    /// from a listener in tests, or handed over from another client that
    /// is relinquishing ownership). The new transport takes sole ownership
    /// of the stream; the previous owner must not close it.
    ///
    /// # Arguments
    ///
    /// * `stream` - An already-connected `TcpStream`
    /// * `addr` - A label for logging (typically the peer address)
    pub fn from_stream(stream: TcpStream, addr: String) -> Self {
        tracing::debug!(addr = %addr, "Taking ownership of existing TCP stream");
        Self {
            stream: Some(stream),
            addr,
        }
    }

    /// The address string this transport was connected to.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            addr = %self.addr,
            bytes = data.len(),
            data = ?data,
            "Sending command bytes"
        );

        stream.write_all(data).await.map_err(|e| {
            tracing::error!(addr = %self.addr, error = %e, "Failed to send data");
            map_io_error(e)
        })?;

        // Flush so the command line goes out immediately.
        stream.flush().await.map_err(|e| {
            tracing::error!(addr = %self.addr, error = %e, "Failed to flush TCP stream");
            map_io_error(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            addr = %self.addr,
            timeout_ms = timeout.as_millis(),
            "Waiting for response bytes"
        );

        let result = tokio::time::timeout(timeout, stream.read(buf)).await;

        match result {
            Ok(Ok(0)) => {
                // 0 bytes read on TCP means the controller closed its end.
                tracing::warn!(addr = %self.addr, "Peer closed connection (0 bytes read)");
                Err(Error::ConnectionLost)
            }
            Ok(Ok(n)) => {
                tracing::trace!(
                    addr = %self.addr,
                    bytes = n,
                    data = ?&buf[..n],
                    "Received response bytes"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(addr = %self.addr, error = %e, "Failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => {
                tracing::trace!(
                    addr = %self.addr,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            tracing::debug!(addr = %self.addr, "Closing controller connection");

            if let Err(e) = stream.flush().await {
                tracing::warn!(
                    addr = %self.addr,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }

            if let Err(e) = stream.shutdown().await {
                tracing::warn!(
                    addr = %self.addr,
                    error = %e,
                    "Failed to shutdown TCP stream (continuing anyway)"
                );
            }

            tracing::info!(addr = %self.addr, "Controller connection closed");
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.stream.is_some() {
            tracing::debug!(addr = %self.addr, "TcpTransport dropped, closing connection");
            // The stream is closed by its own Drop.
        }
    }
}

/// Map a connection-time I/O error to the appropriate [`Error`] variant.
fn map_connect_error(e: std::io::Error, addr: &str) -> Error {
    match e.kind() {
        std::io::ErrorKind::ConnectionRefused => {
            Error::Transport(format!("connection refused: {}", addr))
        }
        _ => Error::Io(e),
    }
}

/// Map a data-path I/O error to the appropriate [`Error`] variant.
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::NotConnected
        | std::io::ErrorKind::ConnectionAborted => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chamberlib_core::transport::Transport;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Helper: bind a TcpListener on a random available port and return it
    /// along with its address string.
    async fn test_listener() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        (listener, addr)
    }

    #[tokio::test]
    async fn connect_send_receive() {
        let (listener, addr) = test_listener().await;

        // Fake controller that answers the identity query.
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            let n = stream.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"*IDN?\n");
            stream.write_all(b"Watlow,F4T,1234,1.0\n").await.unwrap();
            stream.flush().await.unwrap();
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        assert!(transport.is_connected());

        transport.send(b"*IDN?\n").await.unwrap();

        let mut buf = [0u8; 256];
        let n = transport
            .receive(&mut buf, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"Watlow,F4T,1234,1.0\n");

        transport.close().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connect_timeout_to_blackholed_host() {
        // RFC 5737: 192.0.2.0/24 is TEST-NET-1, reserved for documentation.
        // Packets to it are black-holed, not refused.
        let result =
            TcpTransport::connect_with_timeout("192.0.2.1:5025", Duration::from_millis(100)).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        // Depending on the network stack this may be Timeout or an Io error.
        assert!(
            matches!(err, Error::Timeout | Error::Io(_)),
            "expected Timeout or Io, got: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn connect_refused() {
        // Bind a listener and immediately drop it so the port is not listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let result = TcpTransport::connect(&addr).await;
        assert!(result.is_err());
        match result.unwrap_err() {
            Error::Transport(msg) => assert!(
                msg.contains("connection refused"),
                "expected 'connection refused' in message, got: {}",
                msg
            ),
            other => panic!("expected Transport error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn receive_timeout_when_controller_is_silent() {
        let (listener, addr) = test_listener().await;

        // Controller accepts but never replies.
        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();

        let mut buf = [0u8; 256];
        let result = transport.receive(&mut buf, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(Error::Timeout)));

        transport.close().await.unwrap();
        server.abort();
    }

    #[tokio::test]
    async fn disconnection_detection() {
        let (listener, addr) = test_listener().await;

        // Controller accepts then immediately drops the connection.
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            drop(stream);
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        server.await.unwrap();

        // Give the OS a moment to propagate the FIN.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut buf = [0u8; 256];
        let result = transport.receive(&mut buf, Duration::from_secs(2)).await;
        assert!(
            matches!(result, Err(Error::ConnectionLost)),
            "expected ConnectionLost, got: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn send_after_close_returns_not_connected() {
        let (listener, addr) = test_listener().await;

        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        transport.close().await.unwrap();

        let result = transport.send(b"*IDN?\n").await;
        assert!(matches!(result, Err(Error::NotConnected)));

        server.abort();
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let (listener, addr) = test_listener().await;

        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();
        assert!(transport.is_connected());

        transport.close().await.unwrap();
        assert!(!transport.is_connected());

        // Closing again is a no-op, not a double-close.
        transport.close().await.unwrap();
        assert!(!transport.is_connected());

        server.abort();
    }

    #[tokio::test]
    async fn from_stream_takes_ownership() {
        let (listener, _addr) = test_listener().await;
        let listener_addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = stream.read(&mut buf).await.unwrap();
            stream.write_all(&buf[..n]).await.unwrap();
            stream.flush().await.unwrap();
        });

        let raw_stream = TcpStream::connect(listener_addr).await.unwrap();
        let mut transport = TcpTransport::from_stream(raw_stream, listener_addr.to_string());
        assert!(transport.is_connected());

        transport.send(b":KEY1?\n").await.unwrap();

        let mut buf = [0u8; 64];
        let n = transport
            .receive(&mut buf, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b":KEY1?\n");

        transport.close().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn multiple_exchange_cycles() {
        let (listener, addr) = test_listener().await;

        // Controller echoes each command line back.
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            for _ in 0..3 {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                stream.write_all(&buf[..n]).await.unwrap();
                stream.flush().await.unwrap();
            }
        });

        let mut transport = TcpTransport::connect(&addr).await.unwrap();

        for msg in &[
            b":SOURCE:CLOOP1:PVALUE?\n" as &[u8],
            b":SOURCE:CLOOP1:SPOINT?\n",
            b":OUTPUT1:STATE?\n",
        ] {
            transport.send(msg).await.unwrap();
            let mut buf = [0u8; 256];
            let n = transport
                .receive(&mut buf, Duration::from_secs(2))
                .await
                .unwrap();
            assert_eq!(&buf[..n], *msg);
        }

        transport.close().await.unwrap();
        server.await.unwrap();
    }
}
