//! The render bridge.
//!
//! [`RenderBridge`] is the adapter between a host-driven audio callback and
//! a [`DspKernel`]. It exclusively owns the bus configuration and the
//! parameter store, negotiates formats against the kernel's declared
//! capabilities, and drives the kernel through its lifecycle. There are no
//! process-wide singletons: every collaborator receives the bridge instance
//! by reference.
//!
//! All methods here run in the control context; the render entry point
//! lives in [`crate::render`].

use reson_core::{
    AudioFormat, BridgeError, BridgeResult, BusConfig, BusDirection, DspKernel, ParameterStore,
};

use crate::lifecycle::BridgeState;

/// Realtime render bridge around a DSP kernel.
pub struct RenderBridge<K: DspKernel> {
    pub(crate) buses: BusConfig,
    pub(crate) parameters: ParameterStore,
    pub(crate) state: BridgeState<K>,
}

impl<K: DspKernel> RenderBridge<K> {
    /// Create a bridge with the default stereo throughput bus layout.
    pub fn new(kernel: K, parameters: ParameterStore) -> Self {
        Self::with_bus_config(kernel, parameters, BusConfig::default())
    }

    /// Create a bridge with an explicit bus layout.
    pub fn with_bus_config(kernel: K, parameters: ParameterStore, buses: BusConfig) -> Self {
        Self {
            buses,
            parameters,
            state: BridgeState::new(kernel),
        }
    }

    /// The parameter store. Control surfaces write through this; the
    /// render path snapshots it.
    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    /// The committed bus layout.
    pub fn bus_config(&self) -> &BusConfig {
        &self.buses
    }

    /// Committed format of an input bus.
    pub fn input_format(&self, index: usize) -> Option<AudioFormat> {
        self.buses.input_bus(index).map(|bus| bus.format)
    }

    /// Committed format of an output bus.
    pub fn output_format(&self, index: usize) -> Option<AudioFormat> {
        self.buses.output_bus(index).map(|bus| bus.format)
    }

    /// Propose a new format for an input bus.
    ///
    /// Fails with [`BridgeError::InvalidState`] while rendering is active
    /// (formats are immutable mid-render, and the active format is left
    /// untouched), or with [`BridgeError::Format`] when the kernel's
    /// capability set rejects the format.
    pub fn set_input_format(&mut self, index: usize, format: AudioFormat) -> BridgeResult<()> {
        self.set_format(BusDirection::Input, index, format)
    }

    /// Propose a new format for an output bus. Same failure modes as
    /// [`set_input_format`](Self::set_input_format).
    pub fn set_output_format(&mut self, index: usize, format: AudioFormat) -> BridgeResult<()> {
        self.set_format(BusDirection::Output, index, format)
    }

    fn set_format(
        &mut self,
        direction: BusDirection,
        index: usize,
        format: AudioFormat,
    ) -> BridgeResult<()> {
        if self.state.is_rendering() {
            log::warn!("rejected format change on {:?} bus {}: rendering", direction, index);
            return Err(BridgeError::InvalidState(
                "bus formats are immutable while rendering",
            ));
        }
        let capabilities = self
            .state
            .kernel()
            .ok_or(BridgeError::InvalidState("transitioning"))?
            .capabilities();
        self.buses
            .set_format(direction, index, format, &capabilities)?;
        Ok(())
    }

    /// Allocate render resources for the committed bus formats.
    ///
    /// Non-realtime. Prepares the kernel with the committed sample rate
    /// and channel count. Fails with [`BridgeError::Allocation`] when no
    /// coherent bus format is committed, [`BridgeError::Unsupported`] when
    /// the kernel declines the configuration, or
    /// [`BridgeError::InvalidState`] when resources are already allocated
    /// (the existing allocation stays intact).
    pub fn allocate(&mut self) -> BridgeResult<()> {
        let input = self
            .buses
            .input_bus(0)
            .ok_or_else(|| BridgeError::Allocation("no input bus configured".into()))?;
        let output = self
            .buses
            .output_bus(0)
            .ok_or_else(|| BridgeError::Allocation("no output bus configured".into()))?;

        input.format.validate()?;
        output.format.validate()?;
        if input.format.sample_rate != output.format.sample_rate {
            return Err(BridgeError::Allocation(format!(
                "input/output sample rates differ: {} vs {}",
                input.format.sample_rate, output.format.sample_rate
            )));
        }
        if input.format.channel_count != output.format.channel_count {
            return Err(BridgeError::Allocation(format!(
                "input/output channel counts differ: {} vs {}",
                input.format.channel_count, output.format.channel_count
            )));
        }

        let max_frames = self.buses.max_capacity_frames() as usize;
        if max_frames == 0 {
            return Err(BridgeError::Allocation("bus capacity is zero frames".into()));
        }

        self.state.allocate(
            output.format.sample_rate,
            output.format.channel_count as usize,
            max_frames,
        )
    }

    /// Release render resources. Idempotent; bus formats become mutable
    /// again afterwards.
    pub fn deallocate(&mut self) {
        self.state.deallocate();
    }

    /// Whether render resources are currently allocated.
    pub fn is_allocated(&self) -> bool {
        self.state.is_allocated()
    }

    /// Whether a render session has started producing blocks.
    pub fn is_rendering(&self) -> bool {
        self.state.is_rendering()
    }

    /// Sample rate of the live allocation, if any.
    pub fn sample_rate(&self) -> Option<f64> {
        self.state.sample_rate()
    }

    /// Largest renderable block of the live allocation, if any.
    pub fn max_frames(&self) -> Option<usize> {
        self.state.max_frames()
    }

    /// Clear the kernel's transient state (delay lines) without touching
    /// the allocation. No-op when unallocated.
    pub fn reset(&mut self) {
        if let Some(kernel) = self.state.kernel_mut() {
            kernel.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reson_core::{FormatError, RenderContext, SampleFormat};
    use reson_kernels::{filter_parameters, FilterKernel, PassthroughKernel};

    fn stereo_bridge() -> RenderBridge<PassthroughKernel> {
        RenderBridge::with_bus_config(
            PassthroughKernel::new(),
            ParameterStore::none(),
            BusConfig::stereo_throughput(48_000.0, 512),
        )
    }

    #[test]
    fn allocate_uses_committed_formats() {
        let mut bridge = stereo_bridge();
        bridge.allocate().unwrap();
        assert_eq!(bridge.sample_rate(), Some(48_000.0));
        assert_eq!(bridge.max_frames(), Some(512));
        bridge.deallocate();
        assert!(!bridge.is_allocated());
    }

    #[test]
    fn double_allocate_is_invalid_state() {
        let mut bridge = stereo_bridge();
        bridge.allocate().unwrap();
        let err = bridge.allocate().unwrap_err();
        assert!(matches!(err, BridgeError::InvalidState(_)));
        // First allocation intact and still renders.
        assert_eq!(bridge.sample_rate(), Some(48_000.0));
        let input = vec![0.5f32; 64];
        let mut left = vec![0.0f32; 64];
        let mut right = vec![0.0f32; 64];
        let status = bridge.render(
            &RenderContext::new(0.0, 64),
            &[&input, &input],
            &mut [&mut left, &mut right],
        );
        assert!(status.is_complete());
    }

    #[test]
    fn format_change_before_rendering_is_allowed() {
        let mut bridge = stereo_bridge();
        bridge
            .set_output_format(0, AudioFormat::stereo(96_000.0))
            .unwrap();
        assert_eq!(bridge.output_format(0).unwrap().sample_rate, 96_000.0);
    }

    #[test]
    fn format_change_while_rendering_fails_and_keeps_format() {
        let mut bridge = stereo_bridge();
        bridge.allocate().unwrap();

        // Enter the rendering state with one block.
        let input = vec![0.0f32; 32];
        let mut left = vec![0.0f32; 32];
        let mut right = vec![0.0f32; 32];
        let _ = bridge.render(
            &RenderContext::new(0.0, 32),
            &[&input, &input],
            &mut [&mut left, &mut right],
        );
        assert!(bridge.is_rendering());

        let before = bridge.input_format(0).unwrap();
        let err = bridge
            .set_input_format(0, AudioFormat::stereo(96_000.0))
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidState(_)));
        assert_eq!(bridge.input_format(0).unwrap(), before);

        // Deallocating makes formats mutable again.
        bridge.deallocate();
        bridge
            .set_input_format(0, AudioFormat::stereo(96_000.0))
            .unwrap();
    }

    #[test]
    fn unsupported_format_is_rejected_with_format_error() {
        let mut bridge = RenderBridge::new(FilterKernel::low_pass(), filter_parameters());
        let err = bridge
            .set_output_format(0, AudioFormat::new(48_000.0, 64, SampleFormat::F32))
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Format(FormatError::UnsupportedChannelCount(64))
        ));
    }

    #[test]
    fn allocate_rejects_mismatched_buses() {
        let mut bridge = stereo_bridge();
        bridge
            .set_input_format(0, AudioFormat::mono(48_000.0))
            .unwrap();
        let err = bridge.allocate().unwrap_err();
        assert!(matches!(err, BridgeError::Allocation(_)));
        assert!(!bridge.is_allocated());
    }
}
