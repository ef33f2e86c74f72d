//! Core abstractions for the Reson realtime render bridge.
//!
//! This crate defines the pieces the bridge is assembled from, with no
//! external dependencies:
//!
//! - [`bus_config`]: audio formats and the bus layout, validated against a
//!   kernel's declared capabilities
//! - [`parameter_types`] / [`parameter_store`]: lock-free atomic parameter
//!   storage and per-block snapshots
//! - [`kernel`]: the [`DspKernel`] capability interface every signal
//!   processor implements
//! - [`process_context`]: per-call render data and the in-band
//!   [`RenderStatus`]
//! - [`error`]: the control-context error taxonomy
//!
//! # Concurrency model
//!
//! Two domains share state through this crate: a control context (any
//! thread, may block and allocate) and a render context (the host's
//! periodic callback, which must never do either). The only cross-domain
//! state is the parameter store, which publishes values through per-value
//! atomics — no mutex, no allocation, no system call on the render path.

pub mod bus_config;
pub mod error;
pub mod kernel;
pub mod parameter_info;
pub mod parameter_range;
pub mod parameter_store;
pub mod parameter_types;
pub mod process_context;
pub mod smoothing;
pub mod types;

pub use bus_config::{AudioFormat, Bus, BusConfig, BusDirection, SampleFormat};
pub use error::{BridgeError, BridgeResult, FormatError, UnsupportedConfiguration};
pub use kernel::{DspKernel, KernelCapabilities};
pub use parameter_info::{ParameterFlags, ParameterInfo, ParameterUnit};
pub use parameter_range::{LinearMapper, LogMapper, RangeMapper};
pub use parameter_store::{ParameterSnapshot, ParameterStore};
pub use parameter_types::FloatParameter;
pub use process_context::{RenderContext, RenderStatus};
pub use smoothing::{Smoother, SmoothingStyle};
pub use types::{ParameterId, ParameterValue, MAX_BUSES, MAX_CHANNELS, MAX_PARAMETERS};
