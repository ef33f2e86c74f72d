//! Error types for configuration and lifecycle operations.
//!
//! Errors here are control-context only. The render path never returns a
//! `Result`: a block that cannot be completed produces silence and an
//! in-band [`RenderStatus::Underrun`](crate::process_context::RenderStatus)
//! instead, so no unwinding or allocation ever happens on the audio thread.

use std::fmt;

use crate::bus_config::{BusDirection, SampleFormat};

/// A proposed bus format was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Sample rate outside the kernel's declared capability range.
    UnsupportedSampleRate(f64),
    /// Channel count not supported by the kernel.
    UnsupportedChannelCount(u32),
    /// Sample representation not supported by the kernel.
    UnsupportedSampleFormat(SampleFormat),
    /// Format violates a basic invariant (zero channels, non-positive rate).
    InvalidFormat(&'static str),
    /// The addressed bus does not exist.
    NoSuchBus {
        direction: BusDirection,
        index: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSampleRate(rate) => {
                write!(f, "unsupported sample rate: {} Hz", rate)
            }
            Self::UnsupportedChannelCount(channels) => {
                write!(f, "unsupported channel count: {}", channels)
            }
            Self::UnsupportedSampleFormat(format) => {
                write!(f, "unsupported sample format: {:?}", format)
            }
            Self::InvalidFormat(reason) => write!(f, "invalid format: {}", reason),
            Self::NoSuchBus { direction, index } => {
                write!(f, "no such bus: {:?} bus {}", direction, index)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// The kernel cannot prepare for the requested configuration.
///
/// Surfaced at allocate time. Fatal to that allocation attempt, but
/// recoverable: reconfigure the buses and allocate again.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedConfiguration {
    pub sample_rate: f64,
    pub channel_count: u32,
}

impl fmt::Display for UnsupportedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kernel cannot prepare for {} Hz / {} channels",
            self.sample_rate, self.channel_count
        )
    }
}

impl std::error::Error for UnsupportedConfiguration {}

/// Errors surfaced to the control context by the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// A proposed bus format was rejected.
    Format(FormatError),
    /// The kernel declined the committed configuration during prepare.
    Unsupported(UnsupportedConfiguration),
    /// Operation attempted in the wrong lifecycle state.
    InvalidState(&'static str),
    /// Render resource allocation failed.
    Allocation(String),
    /// A state blob could not be decoded or applied.
    State(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "format rejected: {}", e),
            Self::Unsupported(e) => write!(f, "{}", e),
            Self::InvalidState(context) => write!(f, "invalid state: {}", context),
            Self::Allocation(reason) => write!(f, "allocation failed: {}", reason),
            Self::State(reason) => write!(f, "state error: {}", reason),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Unsupported(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for BridgeError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<UnsupportedConfiguration> for BridgeError {
    fn from(e: UnsupportedConfiguration) -> Self {
        Self::Unsupported(e)
    }
}

/// Convenience alias for control-context results.
pub type BridgeResult<T> = Result<T, BridgeError>;
