//! F4T command builders and response parsers.
//!
//! This module provides functions to construct command byte sequences for
//! the F4T operations (units, ramp configuration, setpoint, outputs,
//! profiles, cascade control) and to parse the corresponding responses.
//!
//! All functions are pure -- they produce or consume byte vectors / string
//! slices without performing any I/O. The caller is responsible for
//! sending the bytes over a transport and feeding received lines back into
//! the parsers.
//!
//! # Cascade vs direct command families
//!
//! Chambers fitted with the cascade option (an outer device-under-test
//! sensor paired with an inner air sensor) use a separate command family
//! for every temperature-related operation: `:SOURCE:CASCADE{n}:...`
//! instead of `:SOURCE:CLOOP{n}:...`. The builders here take a `cascade`
//! flag and select the family in exactly one place, so a driver fixed to
//! one mode can never emit a mixed pair.

use chamberlib_core::{ControlLoop, Error, RampAction, RampScale, Result, TemperatureUnits};

use crate::models::F4tModel;
use crate::protocol::encode_command;

/// Highest profile slot the controller exposes.
pub const PROFILE_SLOTS: u8 = 40;

// ---------------------------------------------------------------
// Identity
// ---------------------------------------------------------------

/// Build the identity handshake query (`*IDN?`).
pub fn cmd_identify() -> Vec<u8> {
    encode_command("*IDN?", "")
}

// ---------------------------------------------------------------
// Units
// ---------------------------------------------------------------

/// Build a "query display units" command.
///
/// The path is firmware-dependent (`:UNIT:TEMP?` vs `:UNITS:TEMPERATURE?`),
/// hence the model parameter.
pub fn cmd_query_units(model: &F4tModel) -> Vec<u8> {
    encode_command(model.units_query_path, "")
}

/// Build a "set display units" command (`:UNIT:TEMP C` / `:UNIT:TEMP F`).
pub fn cmd_set_units(model: &F4tModel, units: TemperatureUnits) -> Vec<u8> {
    encode_command(model.units_set_path, units.as_token())
}

// ---------------------------------------------------------------
// Ramp configuration
// ---------------------------------------------------------------

/// Build a "set ramp action" command (`:SOURCE:CLOOP{n}:RACTION {action}`).
pub fn cmd_set_ramp_action(cloop: ControlLoop, action: RampAction) -> Vec<u8> {
    encode_command(&format!(":SOURCE:CLOOP{cloop}:RACTION"), action.as_token())
}

/// Build a "set ramp timescale" command (`:SOURCE:CLOOP{n}:RSCALE {scale}`).
pub fn cmd_set_ramp_scale(cloop: ControlLoop, scale: RampScale) -> Vec<u8> {
    encode_command(&format!(":SOURCE:CLOOP{cloop}:RSCALE"), scale.as_token())
}

/// Build a "set ramp rate" command (`:SOURCE:CLOOP{n}:RRATE {rate}`).
///
/// The rate is degrees per ramp-scale unit. The client performs no range
/// validation; out-of-range values are passed through for the device to
/// judge.
pub fn cmd_set_ramp_rate(cloop: ControlLoop, rate: f64) -> Vec<u8> {
    encode_command(&format!(":SOURCE:CLOOP{cloop}:RRATE"), &format_number(rate))
}

/// Build a "set ramp time" command (`:SOURCE:CLOOP{n}:RTIME {time}`).
pub fn cmd_set_ramp_time(cloop: ControlLoop, time: f64) -> Vec<u8> {
    encode_command(&format!(":SOURCE:CLOOP{cloop}:RTIME"), &format_number(time))
}

// ---------------------------------------------------------------
// Temperature / setpoint
// ---------------------------------------------------------------

/// Build a "read process value" query.
///
/// Direct chambers read the control loop (`:SOURCE:CLOOP{n}:PVALUE?`);
/// cascade chambers read the inner (air) sensor
/// (`:SOURCE:CASCADE{n}:INNER:PVALUE?`). The outer DUT sensor is not
/// queried by this client.
pub fn cmd_query_temperature(cloop: ControlLoop, cascade: bool) -> Vec<u8> {
    if cascade {
        encode_command(&format!(":SOURCE:CASCADE{cloop}:INNER:PVALUE?"), "")
    } else {
        encode_command(&format!(":SOURCE:CLOOP{cloop}:PVALUE?"), "")
    }
}

/// Build a "read target setpoint" query
/// (`:SOURCE:CLOOP{n}:SPOINT?` / `:SOURCE:CASCADE{n}:SPOINT?`).
pub fn cmd_query_setpoint(cloop: ControlLoop, cascade: bool) -> Vec<u8> {
    if cascade {
        encode_command(&format!(":SOURCE:CASCADE{cloop}:SPOINT?"), "")
    } else {
        encode_command(&format!(":SOURCE:CLOOP{cloop}:SPOINT?"), "")
    }
}

/// Build a "write setpoint" command
/// (`:SOURCE:CLOOP{n}:SPOINT {t}` / `:SOURCE:CASCADE{n}:SPOINT {t}`).
pub fn cmd_set_setpoint(cloop: ControlLoop, cascade: bool, target: f64) -> Vec<u8> {
    let arg = format_number(target);
    if cascade {
        encode_command(&format!(":SOURCE:CASCADE{cloop}:SPOINT"), &arg)
    } else {
        encode_command(&format!(":SOURCE:CLOOP{cloop}:SPOINT"), &arg)
    }
}

/// Build a "read sensor error state" query
/// (`:SOURCE:CLOOP{n}:ERROR?` / `:SOURCE:CASCADE{n}:OUTER:ERROR?`).
pub fn cmd_query_input_error(cloop: ControlLoop, cascade: bool) -> Vec<u8> {
    if cascade {
        encode_command(&format!(":SOURCE:CASCADE{cloop}:OUTER:ERROR?"), "")
    } else {
        encode_command(&format!(":SOURCE:CLOOP{cloop}:ERROR?"), "")
    }
}

// ---------------------------------------------------------------
// Output relays
// ---------------------------------------------------------------

/// Build a "read output relay state" query (`:OUTPUT{n}:STATE?`).
pub fn cmd_query_output(output: u8) -> Vec<u8> {
    encode_command(&format!(":OUTPUT{output}:STATE?"), "")
}

/// Build a "set output relay" command (`:OUTPUT{n}:STATE ON|OFF`).
pub fn cmd_set_output(output: u8, on: bool) -> Vec<u8> {
    encode_command(
        &format!(":OUTPUT{output}:STATE"),
        if on { "ON" } else { "OFF" },
    )
}

// ---------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------

/// Build a "select stored profile" command (`:PROGRAM:NUMBER {i}`).
///
/// Valid slots are 1..=40; the index is passed through unchecked, matching
/// the device's own behavior of ignoring bad slot numbers.
pub fn cmd_select_profile(slot: u8) -> Vec<u8> {
    encode_command(":PROGRAM:NUMBER", &slot.to_string())
}

/// Build a "query selected profile name" command (`:PROGRAM:NAME?`).
pub fn cmd_query_profile_name() -> Vec<u8> {
    encode_command(":PROGRAM:NAME?", "")
}

/// Build a "start selected profile" command.
pub fn cmd_run_profile() -> Vec<u8> {
    encode_command(":PROGRAM:SELECTED:STATE", "START")
}

/// Build a "stop selected profile" command.
pub fn cmd_stop_profile() -> Vec<u8> {
    encode_command(":PROGRAM:SELECTED:STATE", "STOP")
}

// ---------------------------------------------------------------
// Cascade initialization
// ---------------------------------------------------------------

/// Build the "query air-control key state" command (`:KEY1?`).
///
/// KEY1 is the front-panel air-control toggle. It reports `ON` or `OFF`.
pub fn cmd_query_air_key() -> Vec<u8> {
    encode_command(":KEY1?", "")
}

/// Build the "press air-control key" command (`:KEY1 PRESS`).
///
/// There is no direct way to set the key state; it can only be toggled by
/// a simulated press, so callers poll `:KEY1?` and press until the
/// desired state is reported.
pub fn cmd_press_air_key() -> Vec<u8> {
    encode_command(":KEY1", "PRESS")
}

/// Build the fixed cascade configuration sequence.
///
/// Run once after the air-control key is confirmed ON: deviation function,
/// the ± deviation range, single-setpoint control off, and dual (both
/// sensor) control. Each command expects a settling delay and a discarded
/// response.
pub fn cascade_config_sequence(cloop: ControlLoop) -> Vec<Vec<u8>> {
    vec![
        encode_command(&format!(":SOURCE:CASCADE{cloop}:FUNC"), "DEVIATION"),
        encode_command(&format!(":SOURCE:CASCADE{cloop}:RANGE:LOW"), "10"),
        encode_command(&format!(":SOURCE:CASCADE{cloop}:RANGE:HIGH"), "10"),
        encode_command(&format!(":SOURCE:CASCADE{cloop}:SSPOINT:CONTROL"), "OFF"),
        encode_command(&format!(":SOURCE:CASCADE{cloop}:CONTROL"), "BOTH"),
    ]
}

// ---------------------------------------------------------------
// Response parsers
// ---------------------------------------------------------------

/// Parse a numeric reply (process value, setpoint) as a float.
///
/// Fails with [`Error::Protocol`] on non-numeric text, including the
/// empty line produced by a timed-out read.
pub fn parse_float_reply(line: &str) -> Result<f64> {
    line.trim().parse::<f64>().map_err(|_| {
        Error::Protocol(format!("expected a numeric reply, got {line:?}"))
    })
}

/// Parse a units reply (`C` / `F`).
pub fn parse_units_reply(line: &str) -> Result<TemperatureUnits> {
    line.parse()
}

/// Extract a profile name from a `:PROGRAM:NAME?` reply.
///
/// The device quotes names (`"Thermal Cycle A"`); empty slots reply with
/// an empty or all-quote line, which maps to an empty string.
pub fn parse_profile_name(line: &str) -> String {
    line.trim().replace('"', "")
}

/// Format a numeric argument for the wire.
///
/// The controller expects an explicit decimal point on whole-number
/// setpoints (`25.0`, not `25`); fractional values are written as-is.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
