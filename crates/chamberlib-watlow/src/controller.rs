//! F4t -- the driver for Watlow F4T chamber controllers.
//!
//! This module ties the line protocol engine ([`protocol`], [`commands`])
//! to a [`Transport`] to produce a working F4T client. It handles command
//! framing, newline-delimited response reading with a deadline, settling
//! delays after writes, and selection between the direct (`CLOOP`) and
//! cascade (`CASCADE`) command families.
//!
//! The F4T never sends unsolicited data: every line it emits is the reply
//! to the most recent query, and commands must be strictly serialized.
//! The driver enforces this with a `tokio::sync::Mutex` around the
//! transport; one exchange (send plus the matching read) holds the lock
//! for its whole duration.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use chamberlib_core::error::{Error, Result};
use chamberlib_core::transport::Transport;
use chamberlib_core::types::{ControlLoop, OutputState, RampAction, RampScale, TemperatureUnits};

use crate::commands;
use crate::models::F4tModel;
use crate::protocol::{decode_line, DecodeResult};

/// How many query/press rounds to attempt when forcing the air-control
/// key on during cascade initialization before giving up.
const MAX_KEY_TOGGLE_ATTEMPTS: u32 = 8;

/// Read one newline-terminated response line from the transport.
///
/// Accumulates received chunks until a terminator arrives or `timeout`
/// elapses. On timeout any partial line is discarded and `Ok(None)` is
/// returned; the next exchange starts from a clean slate rather than
/// resuming a half-read reply.
pub(crate) async fn read_line(
    transport: &mut Box<dyn Transport>,
    timeout: Duration,
) -> Result<Option<String>> {
    let deadline = tokio::time::Instant::now() + timeout;
    let mut buf = [0u8; 256];
    let mut pending: Vec<u8> = Vec::new();

    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }

        match transport.receive(&mut buf, remaining).await {
            Ok(n) => {
                pending.extend_from_slice(&buf[..n]);
                match decode_line(&pending) {
                    DecodeResult::Line { text, .. } => return Ok(Some(text)),
                    DecodeResult::Malformed(_) => {
                        return Err(Error::Protocol(
                            "response line is not valid text".into(),
                        ));
                    }
                    DecodeResult::Incomplete => {
                        // Need more data, keep reading until the deadline.
                    }
                }
            }
            Err(Error::Timeout) => return Ok(None),
            Err(e) => return Err(e),
        }
    }
}

/// A connected Watlow F4T chamber controller.
///
/// Constructed via [`F4tBuilder`](crate::builder::F4tBuilder). All
/// controller communication goes through the [`Transport`] provided at
/// build time.
///
/// Whether the controller runs in cascade mode is fixed at construction.
/// A cascade instance issues `CASCADE`-family commands exclusively; a
/// direct instance issues `CLOOP`-family commands exclusively.
pub struct F4t {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    model: F4tModel,
    /// The `*IDN?` reply captured during the connection handshake.
    identity: String,
    cascade: bool,
    cloop: ControlLoop,
    read_timeout: Duration,
    settle_delay: Duration,
    /// Last units value written or read. The device is authoritative;
    /// [`refresh_units`](F4t::refresh_units) resynchronizes.
    units: Mutex<TemperatureUnits>,
    /// Profile directory discovered by the first
    /// [`profiles`](F4t::profiles) call.
    profiles: Mutex<Option<BTreeMap<u8, String>>>,
}

impl F4t {
    /// Create a new `F4t` from its constituent parts.
    ///
    /// This is called by [`F4tBuilder`](crate::builder::F4tBuilder);
    /// callers should use the builder API instead.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        model: F4tModel,
        identity: String,
        cascade: bool,
        cloop: ControlLoop,
        read_timeout: Duration,
        settle_delay: Duration,
        initial_units: TemperatureUnits,
    ) -> Self {
        F4t {
            transport: Arc::new(Mutex::new(transport)),
            model,
            identity,
            cascade,
            cloop,
            read_timeout,
            settle_delay,
            units: Mutex::new(initial_units),
            profiles: Mutex::new(None),
        }
    }

    /// The identity string the controller reported at connect time.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The firmware dialect this controller was built for.
    pub fn model(&self) -> &F4tModel {
        &self.model
    }

    /// Whether this controller runs in cascade mode.
    pub fn is_cascade(&self) -> bool {
        self.cascade
    }

    /// The control loop this controller addresses.
    pub fn control_loop(&self) -> ControlLoop {
        self.cloop
    }

    /// Whether the underlying transport is currently connected.
    pub async fn is_connected(&self) -> bool {
        self.transport.lock().await.is_connected()
    }

    /// Close the connection to the controller.
    ///
    /// Idempotent: closing an already-closed controller is a no-op.
    pub async fn close(&self) -> Result<()> {
        self.transport.lock().await.close().await
    }

    // -----------------------------------------------------------------
    // Exchange primitives
    // -----------------------------------------------------------------

    /// Send a query and read its single-line reply.
    ///
    /// A timed-out read yields an empty string; parsers downstream turn
    /// that into a typed protocol error where a reply was required.
    async fn query_line(&self, cmd: &[u8]) -> Result<String> {
        let mut transport = self.transport.lock().await;
        transport.send(cmd).await?;
        let line = read_line(&mut transport, self.read_timeout).await?;
        Ok(line.unwrap_or_default())
    }

    /// Send a command the device acknowledges (or echoes), wait for the
    /// settling delay, and discard whatever single line comes back.
    async fn set_and_discard(&self, cmd: &[u8]) -> Result<()> {
        let mut transport = self.transport.lock().await;
        transport.send(cmd).await?;
        tokio::time::sleep(self.settle_delay).await;
        let _ = read_line(&mut transport, self.read_timeout).await?;
        Ok(())
    }

    /// Send a command that produces no reply, then wait for the settling
    /// delay. The F4T silently applies writes; issuing the next command
    /// too quickly gets it dropped.
    async fn send_only(&self, cmd: &[u8]) -> Result<()> {
        let mut transport = self.transport.lock().await;
        transport.send(cmd).await?;
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Units
    // -----------------------------------------------------------------

    /// The last-known temperature units, without touching the device.
    pub async fn units(&self) -> TemperatureUnits {
        *self.units.lock().await
    }

    /// Query the device for its current display units and update the
    /// cached value.
    pub async fn refresh_units(&self) -> Result<TemperatureUnits> {
        let cmd = commands::cmd_query_units(&self.model);
        debug!("reading temperature units");
        let reply = self.query_line(&cmd).await?;
        let units = commands::parse_units_reply(&reply)?;
        *self.units.lock().await = units;
        Ok(units)
    }

    /// Set the controller's display units.
    pub async fn set_units(&self, units: TemperatureUnits) -> Result<()> {
        let cmd = commands::cmd_set_units(&self.model, units);
        debug!(%units, "setting temperature units");
        self.set_and_discard(&cmd).await?;
        *self.units.lock().await = units;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Temperature / setpoint
    // -----------------------------------------------------------------

    /// Read the current process value (chamber air temperature).
    pub async fn get_temperature(&self) -> Result<f64> {
        let cmd = commands::cmd_query_temperature(self.cloop, self.cascade);
        debug!("reading process value");
        let reply = self.query_line(&cmd).await?;
        commands::parse_float_reply(&reply)
    }

    /// Read the active target setpoint.
    pub async fn get_setpoint(&self) -> Result<f64> {
        let cmd = commands::cmd_query_setpoint(self.cloop, self.cascade);
        debug!("reading setpoint");
        let reply = self.query_line(&cmd).await?;
        commands::parse_float_reply(&reply)
    }

    /// Write a new target setpoint.
    ///
    /// No range validation is performed; the chamber's own configured
    /// limits are authoritative.
    pub async fn set_setpoint(&self, target: f64) -> Result<()> {
        if !target.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "setpoint must be finite, got {target}"
            )));
        }
        let cmd = commands::cmd_set_setpoint(self.cloop, self.cascade, target);
        debug!(target, "setting setpoint");
        self.send_only(&cmd).await
    }

    /// Read the sensor error state for this controller's loop.
    ///
    /// Returns the controller's raw error token (`NONE` when healthy).
    /// An empty string means the controller did not answer in time.
    pub async fn get_input_error(&self) -> Result<String> {
        let cmd = commands::cmd_query_input_error(self.cloop, self.cascade);
        debug!("reading sensor error state");
        let reply = self.query_line(&cmd).await?;
        Ok(reply.trim().to_string())
    }

    // -----------------------------------------------------------------
    // Ramp configuration
    // -----------------------------------------------------------------

    /// Configure when the controller ramps toward a new setpoint rather
    /// than stepping instantly.
    pub async fn set_ramp_action(&self, action: RampAction) -> Result<()> {
        debug!(%action, "setting ramp action");
        self.set_and_discard(&commands::cmd_set_ramp_action(self.cloop, action))
            .await
    }

    /// Set the timescale the ramp rate and ramp time are expressed in.
    pub async fn set_ramp_scale(&self, scale: RampScale) -> Result<()> {
        debug!(%scale, "setting ramp scale");
        self.set_and_discard(&commands::cmd_set_ramp_scale(self.cloop, scale))
            .await
    }

    /// Set the ramp rate in degrees per ramp-scale unit.
    pub async fn set_ramp_rate(&self, rate: f64) -> Result<()> {
        debug!(rate, "setting ramp rate");
        self.set_and_discard(&commands::cmd_set_ramp_rate(self.cloop, rate))
            .await
    }

    /// Set the ramp time in ramp-scale units.
    pub async fn set_ramp_time(&self, time: f64) -> Result<()> {
        debug!(time, "setting ramp time");
        self.set_and_discard(&commands::cmd_set_ramp_time(self.cloop, time))
            .await
    }

    // -----------------------------------------------------------------
    // Output relays
    // -----------------------------------------------------------------

    /// Read the state of an output relay channel.
    ///
    /// The result is three-valued: a reply the driver does not recognize
    /// (or no reply at all) maps to [`OutputState::Unknown`] rather than
    /// an error.
    pub async fn is_output_on(&self, output: u8) -> Result<OutputState> {
        let cmd = commands::cmd_query_output(output);
        debug!(output, "reading output state");
        let reply = self.query_line(&cmd).await?;
        Ok(OutputState::from_reply(&reply))
    }

    /// Switch an output relay channel on or off.
    pub async fn set_output(&self, output: u8, on: bool) -> Result<()> {
        let cmd = commands::cmd_set_output(output, on);
        debug!(output, on, "setting output state");
        self.send_only(&cmd).await
    }

    // -----------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------

    /// Discover the named profiles stored on the controller.
    ///
    /// The controller offers no directory listing, so slots 1 through 40
    /// are probed in order (select, then query the name) and probing
    /// stops at the first empty slot. The result is cached; subsequent
    /// calls return the cached map without touching the device.
    pub async fn profiles(&self) -> Result<BTreeMap<u8, String>> {
        {
            let cache = self.profiles.lock().await;
            if let Some(map) = cache.as_ref() {
                return Ok(map.clone());
            }
        }

        debug!("probing stored profiles");
        let map = self.probe_profiles().await?;
        debug!(count = map.len(), "profile probe complete");
        *self.profiles.lock().await = Some(map.clone());
        Ok(map)
    }

    async fn probe_profiles(&self) -> Result<BTreeMap<u8, String>> {
        let mut map = BTreeMap::new();
        for slot in 1..=commands::PROFILE_SLOTS {
            self.send_only(&commands::cmd_select_profile(slot)).await?;
            let reply = self.query_line(&commands::cmd_query_profile_name()).await?;
            let name = commands::parse_profile_name(&reply);
            if name.is_empty() {
                break;
            }
            map.insert(slot, name);
        }
        Ok(map)
    }

    /// Select a stored profile slot as the active profile.
    pub async fn select_profile(&self, slot: u8) -> Result<()> {
        if slot == 0 || slot > commands::PROFILE_SLOTS {
            return Err(Error::InvalidParameter(format!(
                "profile slot {slot} out of range 1-{}",
                commands::PROFILE_SLOTS
            )));
        }
        debug!(slot, "selecting profile");
        self.send_only(&commands::cmd_select_profile(slot)).await
    }

    /// Start executing the currently selected profile.
    pub async fn run_profile(&self) -> Result<()> {
        debug!("starting selected profile");
        self.send_only(&commands::cmd_run_profile()).await
    }

    /// Stop the currently running profile.
    pub async fn stop_profile(&self) -> Result<()> {
        debug!("stopping profile");
        self.send_only(&commands::cmd_stop_profile()).await
    }

    // -----------------------------------------------------------------
    // Cascade initialization
    // -----------------------------------------------------------------

    /// One-time cascade setup, run by the builder right after the
    /// identity handshake. A no-op on direct-mode controllers.
    ///
    /// Forces the front-panel air-control key on, then applies the fixed
    /// deviation-control configuration to the cascade loop.
    pub(crate) async fn cascade_init(&self) -> Result<()> {
        if !self.cascade {
            return Ok(());
        }

        self.ensure_air_control().await?;

        for cmd in commands::cascade_config_sequence(self.cloop) {
            self.set_and_discard(&cmd).await?;
        }
        debug!("cascade configuration applied");
        Ok(())
    }

    /// Poll the air-control key and press it until it reports ON.
    ///
    /// The key is a toggle with no direct set command, so each round
    /// queries the state and presses once if it is not yet ON. Gives up
    /// with [`Error::Timeout`] after a bounded number of rounds so a
    /// wedged front panel cannot hang connection setup.
    async fn ensure_air_control(&self) -> Result<()> {
        for attempt in 1..=MAX_KEY_TOGGLE_ATTEMPTS {
            let reply = self.query_line(&commands::cmd_query_air_key()).await?;
            if reply.trim() == "ON" {
                debug!(attempt, "air-control key is on");
                return Ok(());
            }
            debug!(attempt, reply = %reply, "air-control key not on, pressing");
            self.send_only(&commands::cmd_press_air_key()).await?;
        }
        Err(Error::Timeout)
    }
}
