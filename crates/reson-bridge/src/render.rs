//! The render entry point.
//!
//! [`RenderBridge::render`] is the one method the host's audio callback
//! invokes, once per block, synchronously. Everything on this path is
//! bounded: one parameter snapshot (relaxed atomic loads into stack
//! storage), one kernel process call, no locks, no allocation, no logging,
//! no unwinding. Failures are reported in-band as
//! [`RenderStatus::Underrun`] with silence in the output buffers; the next
//! block proceeds normally.

use reson_core::{DspKernel, RenderContext, RenderStatus};

use crate::bridge::RenderBridge;
use crate::lifecycle::BridgeState;

/// Write silence into the affected block.
fn silence(outputs: &mut [&mut [f32]], frames: usize) {
    for channel in outputs.iter_mut() {
        let n = frames.min(channel.len());
        channel[..n].fill(0.0);
    }
}

impl<K: DspKernel> RenderBridge<K> {
    /// Render one block.
    ///
    /// `inputs` and `outputs` are per-channel sample slices borrowed from
    /// the host, valid only for this call. On success the kernel has
    /// written exactly `ctx.frames` samples per committed output channel;
    /// any surplus output channels are silenced. Underruns are reported
    /// for:
    ///
    /// - render resources not allocated
    /// - a host-reported missed deadline (the bridge trusts the report;
    ///   it does not measure wall-clock time itself)
    /// - a block larger than the allocated maximum
    /// - buffer lists that do not match the committed channel count
    ///
    /// In every underrun case the affected block carries silence and the
    /// bridge remains ready for the next block.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> RenderStatus {
        let BridgeState::Allocated {
            kernel,
            channel_count,
            max_frames,
            rendering,
            ..
        } = &mut self.state
        else {
            silence(outputs, ctx.frames);
            return RenderStatus::Underrun;
        };

        // First render call of the session transitions Allocated →
        // rendering; bus formats stay frozen until deallocate.
        *rendering = true;

        if ctx.deadline_missed()
            || ctx.frames > *max_frames
            || inputs.len() < *channel_count
            || outputs.len() < *channel_count
            || inputs[..*channel_count].iter().any(|c| c.len() < ctx.frames)
            || outputs[..*channel_count].iter().any(|c| c.len() < ctx.frames)
        {
            silence(outputs, ctx.frames);
            return RenderStatus::Underrun;
        }

        // Surplus output channels beyond the committed count carry
        // silence, not stale host data.
        silence(&mut outputs[*channel_count..], ctx.frames);

        let snapshot = self.parameters.snapshot();
        kernel.process(
            &inputs[..*channel_count],
            &mut outputs[..*channel_count],
            ctx.frames,
            &snapshot,
        );
        RenderStatus::Complete
    }
}
