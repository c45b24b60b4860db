//! F4T firmware dialect definitions.
//!
//! Fielded F4T units do not all speak the same command paths: the units
//! query is `:UNIT:TEMP?` on current firmware but `:UNITS:TEMPERATURE?`
//! on older loads, and the two forms are not interchangeable. Rather than
//! hard-coding one form, each supported firmware generation is described
//! by an [`F4tModel`] carrying the paths that diverge; the command
//! builders take the model as a parameter.
//!
//! Models are defined as factory functions that return a fully populated
//! [`F4tModel`]:
//!
//! | Factory        | Firmware        | Units query            |
//! |----------------|-----------------|------------------------|
//! | [`f4t()`]      | 3.x and later   | `:UNIT:TEMP?`          |
//! | [`f4t_legacy()`] | pre-3.x       | `:UNITS:TEMPERATURE?`  |
//!
//! Confirm the dialect against the target chamber before relying on the
//! units commands; everything else in the command set is shared.

/// Static description of one F4T firmware generation.
#[derive(Debug, Clone)]
pub struct F4tModel {
    /// Human-readable name (e.g. "F4T").
    pub name: &'static str,
    /// Command path for the temperature-units query (without the
    /// argument or terminator).
    pub units_query_path: &'static str,
    /// Command path for the temperature-units set command.
    pub units_set_path: &'static str,
}

/// F4T with current (3.x+) firmware.
///
/// This is the dialect the vast majority of deployed chambers speak and
/// the one to reach for unless the chamber is known to be on an old
/// firmware load.
pub fn f4t() -> F4tModel {
    F4tModel {
        name: "F4T",
        units_query_path: ":UNIT:TEMP?",
        units_set_path: ":UNIT:TEMP",
    }
}

/// F4T with pre-3.x firmware, which uses the long-form units paths.
pub fn f4t_legacy() -> F4tModel {
    F4tModel {
        name: "F4T (legacy firmware)",
        units_query_path: ":UNITS:TEMPERATURE?",
        units_set_path: ":UNITS:TEMPERATURE",
    }
}
