//! Identity kernel.
//!
//! Copies input to output untouched. Useful as a null processor and as the
//! reference kernel in bridge tests, where output must be bit-identical to
//! input.

use reson_core::{
    DspKernel, KernelCapabilities, ParameterSnapshot, UnsupportedConfiguration,
};

/// A kernel whose transfer function is the identity.
#[derive(Debug, Default)]
pub struct PassthroughKernel {
    channel_count: usize,
}

impl PassthroughKernel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DspKernel for PassthroughKernel {
    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::default()
    }

    fn prepare(
        &mut self,
        sample_rate: f64,
        channel_count: usize,
    ) -> Result<(), UnsupportedConfiguration> {
        if !self.capabilities().supports(sample_rate, channel_count as u32) {
            return Err(UnsupportedConfiguration {
                sample_rate,
                channel_count: channel_count as u32,
            });
        }
        self.channel_count = channel_count;
        Ok(())
    }

    fn reset(&mut self) {}

    fn process(
        &mut self,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frames: usize,
        _parameters: &ParameterSnapshot,
    ) {
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            output[..frames].copy_from_slice(&input[..frames]);
        }
    }

    fn teardown(&mut self) {
        self.channel_count = 0;
    }
}
