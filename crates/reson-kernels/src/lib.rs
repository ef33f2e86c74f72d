//! Concrete DSP kernels for the Reson render bridge.
//!
//! Every kernel here implements [`reson_core::DspKernel`] and is
//! interchangeable behind the bridge: biquad low-pass and band-pass
//! filters, plus an identity passthrough.

pub mod biquad;
pub mod filter;
pub mod passthrough;

pub use biquad::{BiquadSection, Coefficients};
pub use filter::{
    filter_parameters, FilterKernel, FilterMode, CUTOFF_RANGE, DEFAULT_CUTOFF, DEFAULT_RESONANCE,
    PARAM_CUTOFF, PARAM_RESONANCE, RESONANCE_RANGE,
};
pub use passthrough::PassthroughKernel;
