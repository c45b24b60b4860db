//! Shared typed vocabulary for chamber controller operations.
//!
//! These enumerations mirror the token sets the controller itself uses on
//! the wire (`C`/`F`, `MINUTES`/`HOURS`, `ON`/`OFF`, ...). Each closed
//! enumeration validates at the API boundary: an invalid token fails with
//! a typed error before any bytes are sent, and an unexpected token in a
//! reply fails decoding with [`Error::Protocol`].

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Temperature display units on the controller.
///
/// The client caches the last-known value, but the device is authoritative;
/// use a units query to resynchronize after anyone touches the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnits {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnits {
    /// The wire token for this unit (`"C"` or `"F"`).
    pub fn as_token(&self) -> &'static str {
        match self {
            TemperatureUnits::Celsius => "C",
            TemperatureUnits::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for TemperatureUnits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "C" => Ok(TemperatureUnits::Celsius),
            "F" => Ok(TemperatureUnits::Fahrenheit),
            other => Err(Error::Protocol(format!(
                "unknown temperature units token: {other:?}"
            ))),
        }
    }
}

/// Timescale for the controller's ramp-rate and ramp-time commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RampScale {
    Minutes,
    Hours,
}

impl RampScale {
    /// The wire token for this scale (`"MINUTES"` or `"HOURS"`).
    pub fn as_token(&self) -> &'static str {
        match self {
            RampScale::Minutes => "MINUTES",
            RampScale::Hours => "HOURS",
        }
    }
}

impl fmt::Display for RampScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for RampScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "MINUTES" => Ok(RampScale::Minutes),
            "HOURS" => Ok(RampScale::Hours),
            other => Err(Error::Protocol(format!(
                "unknown ramp scale token: {other:?}"
            ))),
        }
    }
}

/// When the controller applies ramped (vs instantaneous) setpoint
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RampAction {
    /// Jump to the setpoint instantly.
    Off,
    /// Ramp to the setpoint at power-on.
    Startup,
    /// Ramp whenever the setpoint changes.
    Setpoint,
    /// Ramp on power-on and on setpoint change.
    Both,
}

impl RampAction {
    /// The wire token for this action.
    pub fn as_token(&self) -> &'static str {
        match self {
            RampAction::Off => "OFF",
            RampAction::Startup => "STARTUP",
            RampAction::Setpoint => "SETPOINT",
            RampAction::Both => "BOTH",
        }
    }
}

impl fmt::Display for RampAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for RampAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "OFF" => Ok(RampAction::Off),
            "STARTUP" => Ok(RampAction::Startup),
            "SETPOINT" => Ok(RampAction::Setpoint),
            "BOTH" => Ok(RampAction::Both),
            other => Err(Error::Protocol(format!(
                "unknown ramp action token: {other:?}"
            ))),
        }
    }
}

/// Reported state of an output relay channel.
///
/// The controller answers output-state queries with the literal tokens
/// `ON` and `OFF`. Anything else (including an empty reply after a read
/// timeout) decodes to [`Unknown`](OutputState::Unknown); callers must
/// handle all three values rather than assume a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputState {
    On,
    Off,
    Unknown,
}

impl OutputState {
    /// Decode an output-state reply. Never fails; unrecognized tokens map
    /// to [`OutputState::Unknown`].
    pub fn from_reply(s: &str) -> Self {
        match s.trim() {
            "ON" => OutputState::On,
            "OFF" => OutputState::Off,
            _ => OutputState::Unknown,
        }
    }
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            OutputState::On => "ON",
            OutputState::Off => "OFF",
            OutputState::Unknown => "UNKNOWN",
        };
        f.write_str(token)
    }
}

/// Identifies one of the controller's independently regulated control
/// loops (temperature zones).
///
/// Single-zone chambers use loop 1; multi-zone chambers address additional
/// loops by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlLoop(u8);

impl ControlLoop {
    /// Control loop 1, the only loop on single-zone chambers.
    pub const ONE: ControlLoop = ControlLoop(1);

    /// Create a control loop identifier. Loop indices are 1-based.
    pub fn new(index: u8) -> Result<Self, Error> {
        if index == 0 {
            return Err(Error::InvalidParameter(
                "control loop indices are 1-based".into(),
            ));
        }
        Ok(ControlLoop(index))
    }

    /// The 1-based loop index.
    pub fn index(&self) -> u8 {
        self.0
    }
}

impl Default for ControlLoop {
    fn default() -> Self {
        ControlLoop::ONE
    }
}

impl fmt::Display for ControlLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
