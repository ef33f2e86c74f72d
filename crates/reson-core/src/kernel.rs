//! The DSP kernel capability interface.
//!
//! A kernel is the stateful signal processor behind the bridge: delay
//! lines, filter coefficients, whatever the transfer function needs. The
//! bridge is written against [`DspKernel`] only and never assumes a
//! specific topology, so low-pass, band-pass, and passthrough kernels are
//! interchangeable.

use std::ops::RangeInclusive;

use crate::bus_config::{AudioFormat, SampleFormat};
use crate::error::{FormatError, UnsupportedConfiguration};
use crate::parameter_store::ParameterSnapshot;
use crate::types::MAX_CHANNELS;

/// What configurations a kernel declares support for.
///
/// Bus format negotiation validates proposed formats against this set
/// before committing them, so `prepare` is only ever asked for
/// configurations the kernel has declared.
#[derive(Clone, Debug)]
pub struct KernelCapabilities {
    /// Largest supported channel count.
    pub max_channels: u32,
    /// Supported sample rate range in Hz.
    pub sample_rates: RangeInclusive<f64>,
    /// Supported sample representations.
    pub sample_formats: &'static [SampleFormat],
}

impl KernelCapabilities {
    pub const fn new(max_channels: u32, sample_rates: RangeInclusive<f64>) -> Self {
        Self {
            max_channels,
            sample_rates,
            sample_formats: &[SampleFormat::F32],
        }
    }

    /// Validate a proposed bus format against this capability set.
    pub fn check_format(&self, format: &AudioFormat) -> Result<(), FormatError> {
        if !self.sample_formats.contains(&format.sample_format) {
            return Err(FormatError::UnsupportedSampleFormat(format.sample_format));
        }
        if format.channel_count > self.max_channels {
            return Err(FormatError::UnsupportedChannelCount(format.channel_count));
        }
        if !self.sample_rates.contains(&format.sample_rate) {
            return Err(FormatError::UnsupportedSampleRate(format.sample_rate));
        }
        Ok(())
    }

    /// Whether a `(sample_rate, channel_count)` pair is supported.
    pub fn supports(&self, sample_rate: f64, channel_count: u32) -> bool {
        channel_count > 0
            && channel_count <= self.max_channels
            && self.sample_rates.contains(&sample_rate)
    }
}

impl Default for KernelCapabilities {
    /// Up to [`MAX_CHANNELS`] channels at common hardware rates.
    fn default() -> Self {
        Self::new(MAX_CHANNELS as u32, 8_000.0..=384_000.0)
    }
}

/// A sample-accurate digital signal processor.
///
/// # Execution contract
///
/// `prepare` and `teardown` run in a non-realtime context and may allocate.
/// `process` runs on the render thread under hard real-time constraints: it
/// must complete in time bounded by the frame count, with no heap
/// allocation, no blocking synchronization, and no I/O. `reset` must also
/// be render-safe — it clears transient state without reallocating.
///
/// Kernels read parameter values from the per-block [`ParameterSnapshot`]
/// and recompute internal coefficients when values changed since the last
/// block; that recomputation must itself be bounded.
pub trait DspKernel: Send {
    /// The configurations this kernel can prepare for.
    fn capabilities(&self) -> KernelCapabilities;

    /// Allocate internal state sized for the given configuration.
    ///
    /// Non-realtime. On error the kernel must be left with no
    /// partially-initialized state reachable by a later `process` call.
    fn prepare(
        &mut self,
        sample_rate: f64,
        channel_count: usize,
    ) -> Result<(), UnsupportedConfiguration>;

    /// Clear transient state (delay lines) without reallocating.
    fn reset(&mut self);

    /// Process one block.
    ///
    /// Consumes `frames` samples from each channel of `inputs` and writes
    /// exactly `frames` samples to each channel of `outputs`. The buffers
    /// are borrowed from the host and valid only for this call.
    fn process(
        &mut self,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frames: usize,
        parameters: &ParameterSnapshot,
    );

    /// Release state allocated by `prepare`. Non-realtime. Idempotent.
    fn teardown(&mut self);
}
