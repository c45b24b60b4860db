//! F4tBuilder -- fluent builder for constructing [`F4t`] instances.
//!
//! Separates configuration from connection so that callers can set up the
//! network endpoint, timeouts, and cascade mode before the TCP connection
//! and identity handshake happen.
//!
//! # Example
//!
//! ```no_run
//! use chamberlib_watlow::builder::F4tBuilder;
//! use chamberlib_watlow::models::f4t;
//! use std::time::Duration;
//!
//! # async fn example() -> chamberlib_core::Result<()> {
//! let chamber = F4tBuilder::new(f4t())
//!     .host("192.168.0.40")
//!     .read_timeout(Duration::from_millis(1000))
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tracing::debug;

use chamberlib_core::error::{Error, Result};
use chamberlib_core::transport::Transport;
use chamberlib_core::types::{ControlLoop, TemperatureUnits};

use chamberlib_transport::TcpTransport;

use crate::commands;
use crate::controller::{read_line, F4t};
use crate::models::F4tModel;

/// TCP port of the F4T's SCPI command interface.
pub const DEFAULT_PORT: u16 = 5025;

/// How long to spend draining stale bytes left on the socket before the
/// identity handshake.
const STALE_DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Fluent builder for [`F4t`].
///
/// All configuration has sensible defaults, so the simplest usage is:
///
/// ```ignore
/// let chamber = F4tBuilder::new(f4t())
///     .host("192.168.0.40")
///     .connect()
///     .await?;
/// ```
pub struct F4tBuilder {
    model: F4tModel,
    host: Option<String>,
    port: u16,
    connect_timeout: Duration,
    read_timeout: Duration,
    settle_delay: Duration,
    cascade: bool,
    control_loop: ControlLoop,
    initial_units: TemperatureUnits,
}

impl F4tBuilder {
    /// Create a new builder for the given firmware dialect.
    pub fn new(model: F4tModel) -> Self {
        F4tBuilder {
            model,
            host: None,
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_millis(1500),
            settle_delay: Duration::from_millis(200),
            cascade: false,
            control_loop: ControlLoop::ONE,
            initial_units: TemperatureUnits::Celsius,
        }
    }

    /// Set the controller's hostname or IP address.
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Override the SCPI command port (default: 5025).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the timeout for establishing the TCP connection (default: 5s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout for waiting for a single response line
    /// (default: 1500ms).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the settling delay applied after each write command
    /// (default: 200ms). The controller drops commands that arrive
    /// before the previous write has been applied.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Enable cascade mode for chambers fitted with the part-temperature
    /// sensor option (default: off).
    ///
    /// The mode is fixed for the lifetime of the controller: a cascade
    /// instance uses the `CASCADE` command family exclusively, a direct
    /// instance the `CLOOP` family. Connecting in cascade mode also runs
    /// the one-time cascade configuration sequence.
    pub fn cascade(mut self, enabled: bool) -> Self {
        self.cascade = enabled;
        self
    }

    /// Address a control loop other than loop 1 on multi-zone chambers.
    pub fn control_loop(mut self, cloop: ControlLoop) -> Self {
        self.control_loop = cloop;
        self
    }

    /// Set the units value the controller cache starts from
    /// (default: Celsius). Call
    /// [`refresh_units`](F4t::refresh_units) after connecting to read
    /// the device's actual setting.
    pub fn initial_units(mut self, units: TemperatureUnits) -> Self {
        self.initial_units = units;
        self
    }

    /// Connect over TCP and perform the identity handshake.
    ///
    /// Requires that [`host()`](Self::host) has been called.
    pub async fn connect(self) -> Result<F4t> {
        let host = self
            .host
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("host is required for connect()".into()))?;
        let addr = format!("{host}:{}", self.port);

        let transport = TcpTransport::connect_with_timeout(&addr, self.connect_timeout).await?;
        self.connect_with_transport(Box::new(transport)).await
    }

    /// Perform the handshake on a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a
    /// `MockTransport` from `chamberlib-test-harness`) and for advanced
    /// use cases where the caller manages the transport lifecycle
    /// directly.
    pub async fn connect_with_transport(self, mut transport: Box<dyn Transport>) -> Result<F4t> {
        // A previous session may have left unread reply bytes on the
        // socket; drain them so the identity reply is not misattributed.
        drain_stale(&mut transport).await;

        transport.send(&commands::cmd_identify()).await?;
        let identity = read_line(&mut transport, self.read_timeout)
            .await?
            .ok_or(Error::Timeout)?;
        debug!(identity = %identity, "controller identified");

        let controller = F4t::new(
            transport,
            self.model,
            identity,
            self.cascade,
            self.control_loop,
            self.read_timeout,
            self.settle_delay,
            self.initial_units,
        );

        controller.cascade_init().await?;
        Ok(controller)
    }
}

/// Discard any bytes already queued on the transport.
async fn drain_stale(transport: &mut Box<dyn Transport>) {
    let mut buf = [0u8; 256];
    while let Ok(n) = transport.receive(&mut buf, STALE_DRAIN_TIMEOUT).await {
        if n == 0 {
            break;
        }
        debug!(discarded = n, "dropped stale bytes before handshake");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::f4t;
    use chamberlib_test_harness::MockTransport;

    #[tokio::test]
    async fn handshake_captures_identity() {
        let mut mock = MockTransport::new();
        mock.expect(b"*IDN?\n", b"Watlow Electric, F4T, 1234, 4.05\n");

        let chamber = F4tBuilder::new(f4t())
            .connect_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(chamber.identity(), "Watlow Electric, F4T, 1234, 4.05");
        assert!(!chamber.is_cascade());
        assert_eq!(chamber.control_loop(), ControlLoop::ONE);
        assert_eq!(chamber.units().await, TemperatureUnits::Celsius);
    }

    #[tokio::test]
    async fn handshake_no_reply_is_timeout() {
        let mut mock = MockTransport::new();
        mock.expect(b"*IDN?\n", b"");

        let result = F4tBuilder::new(f4t())
            .read_timeout(Duration::from_millis(20))
            .connect_with_transport(Box::new(mock))
            .await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn connect_requires_host() {
        let result = F4tBuilder::new(f4t()).connect().await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn cascade_connect_runs_configuration() {
        let mut mock = MockTransport::new();
        mock.expect(b"*IDN?\n", b"Watlow Electric, F4T, 1234, 4.05\n");
        mock.expect(b":KEY1?\n", b"ON\n");
        mock.expect(b":SOURCE:CASCADE1:FUNC DEVIATION\n", b"\n");
        mock.expect(b":SOURCE:CASCADE1:RANGE:LOW 10\n", b"\n");
        mock.expect(b":SOURCE:CASCADE1:RANGE:HIGH 10\n", b"\n");
        mock.expect(b":SOURCE:CASCADE1:SSPOINT:CONTROL OFF\n", b"\n");
        mock.expect(b":SOURCE:CASCADE1:CONTROL BOTH\n", b"\n");

        let chamber = F4tBuilder::new(f4t())
            .cascade(true)
            .settle_delay(Duration::ZERO)
            .read_timeout(Duration::from_millis(50))
            .connect_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert!(chamber.is_cascade());
    }

    #[tokio::test]
    async fn full_stack_over_tcp() {
        use chamberlib_test_harness::MockTcpServer;

        let mut server = MockTcpServer::new().await.unwrap();
        server.expect(b"*IDN?\n", b"Watlow Electric, F4T, 1234, 4.05\n");
        server.expect(b":SOURCE:CLOOP1:PVALUE?\n", b"24.97\n");
        server.expect(b":SOURCE:CLOOP1:SPOINT 85.0\n", b"");
        server.expect(b":SOURCE:CLOOP1:SPOINT?\n", b"85.0\n");

        let addr = server.addr().to_string();
        let ready = server.start_with_ready();
        ready.await.unwrap();

        let transport = TcpTransport::connect(&addr).await.unwrap();
        let chamber = F4tBuilder::new(f4t())
            .read_timeout(Duration::from_millis(500))
            .settle_delay(Duration::ZERO)
            .connect_with_transport(Box::new(transport))
            .await
            .unwrap();

        assert_eq!(chamber.identity(), "Watlow Electric, F4T, 1234, 4.05");
        let temp = chamber.get_temperature().await.unwrap();
        assert!((temp - 24.97).abs() < f64::EPSILON);
        chamber.set_setpoint(85.0).await.unwrap();
        let sp = chamber.get_setpoint().await.unwrap();
        assert!((sp - 85.0).abs() < f64::EPSILON);

        chamber.close().await.unwrap();
        server.wait().await.unwrap();
    }

    #[tokio::test]
    async fn builder_custom_settings_chain() {
        let mut mock = MockTransport::new();
        mock.expect(b"*IDN?\n", b"Watlow Electric, F4T, 5678, 3.01\n");

        let chamber = F4tBuilder::new(f4t())
            .host("10.0.0.40")
            .port(5025)
            .connect_timeout(Duration::from_secs(2))
            .read_timeout(Duration::from_millis(100))
            .settle_delay(Duration::ZERO)
            .initial_units(TemperatureUnits::Fahrenheit)
            .control_loop(ControlLoop::new(2).unwrap())
            .connect_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(chamber.identity(), "Watlow Electric, F4T, 5678, 3.01");
        assert_eq!(chamber.control_loop().index(), 2);
        assert_eq!(chamber.units().await, TemperatureUnits::Fahrenheit);
    }
}
