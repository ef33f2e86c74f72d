//! Shared type aliases and system limits.

/// Unique identifier for a parameter.
///
/// Identifiers are stable keys: once a parameter is registered under an id,
/// that id refers to the same parameter for the lifetime of the store.
pub type ParameterId = u32;

/// Parameter values are stored and published as `f64`.
pub type ParameterValue = f64;

/// Maximum number of buses per direction.
pub const MAX_BUSES: usize = 8;

/// Maximum number of channels per bus.
pub const MAX_CHANNELS: usize = 16;

/// Maximum number of registered parameters.
///
/// [`ParameterSnapshot`](crate::parameter_store::ParameterSnapshot) holds its
/// entries inline, so this bound is what keeps snapshots allocation-free on
/// the render thread.
pub const MAX_PARAMETERS: usize = 32;
