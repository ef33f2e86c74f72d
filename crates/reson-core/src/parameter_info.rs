//! Parameter metadata.
//!
//! A [`ParameterInfo`] is the immutable descriptor of one automatable
//! parameter: stable id, display names, unit, default. Control surfaces
//! read this metadata to build their presentation; the render path never
//! looks at it.

use crate::types::{ParameterId, ParameterValue};

/// Unit type hint for a parameter, used by control surfaces to pick an
/// appropriate control and label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParameterUnit {
    /// Generic continuous value.
    #[default]
    Generic,
    /// Frequency in Hertz.
    Hertz,
    /// Level in decibels.
    Decibels,
    /// Linear gain multiplier.
    LinearGain,
    /// Percentage (0–100%).
    Percent,
    /// Time in seconds.
    Seconds,
}

/// Flags controlling parameter behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterFlags {
    /// Parameter can be automated by the host.
    pub can_automate: bool,
    /// Parameter is the bypass switch.
    pub is_bypass: bool,
    /// Parameter is hidden from the host's parameter list.
    pub is_hidden: bool,
}

impl Default for ParameterFlags {
    fn default() -> Self {
        Self {
            can_automate: true,
            is_bypass: false,
            is_hidden: false,
        }
    }
}

/// Metadata describing a single parameter. Immutable after registration.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Unique, stable parameter identifier.
    pub id: ParameterId,
    /// Full parameter name (e.g., "Cutoff").
    pub name: &'static str,
    /// Short name for constrained UIs.
    pub short_name: &'static str,
    /// Unit label (e.g., "Hz", "dB").
    pub units: &'static str,
    /// Unit type hint.
    pub unit: ParameterUnit,
    /// Default value in normalized form (0.0 to 1.0).
    pub default_normalized: ParameterValue,
    /// Behavioral flags.
    pub flags: ParameterFlags,
}

impl ParameterInfo {
    /// Create a new descriptor with default flags.
    pub const fn new(id: ParameterId, name: &'static str) -> Self {
        Self {
            id,
            name,
            short_name: name,
            units: "",
            unit: ParameterUnit::Generic,
            default_normalized: 0.5,
            flags: ParameterFlags {
                can_automate: true,
                is_bypass: false,
                is_hidden: false,
            },
        }
    }

    pub const fn with_short_name(mut self, short_name: &'static str) -> Self {
        self.short_name = short_name;
        self
    }

    pub const fn with_units(mut self, units: &'static str) -> Self {
        self.units = units;
        self
    }

    pub const fn with_unit(mut self, unit: ParameterUnit) -> Self {
        self.unit = unit;
        self
    }

    pub const fn with_default(mut self, default_normalized: ParameterValue) -> Self {
        self.default_normalized = default_normalized;
        self
    }

    pub const fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }
}
