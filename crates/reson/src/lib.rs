//! # Reson
//!
//! Realtime audio render bridge for Rust.
//!
//! Reson sits between a host-driven audio callback and a DSP kernel. It
//! negotiates bus formats against the kernel's declared capabilities,
//! publishes parameter changes lock-free from control surfaces to the
//! render thread, and drives the kernel through an explicit resource
//! lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Control context                Render context
//! ---------------                --------------
//! set_input_format  ─┐
//! parameters().set  ─┼─> RenderBridge<K> ──> render(ctx, in, out)
//! allocate/dealloc  ─┘         │
//!                              v
//!                        K: DspKernel
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use reson::prelude::*;
//!
//! let mut bridge = RenderBridge::new(FilterKernel::low_pass(), filter_parameters());
//! bridge.parameters().set_value(PARAM_CUTOFF, 880.0);
//!
//! let mut session = RenderSession::begin(&mut bridge).unwrap();
//! let input = vec![0.0f32; 256];
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! let status = session.render(
//!     &RenderContext::new(0.0, 256),
//!     &[&input, &input],
//!     &mut [&mut left, &mut right],
//! );
//! assert!(status.is_complete());
//! ```

pub use reson_bridge as bridge;
pub use reson_core as core;
pub use reson_kernels as kernels;

/// Everything most integrations need, one import away.
pub mod prelude {
    pub use reson_bridge::{RenderBridge, RenderSession};
    pub use reson_core::{
        AudioFormat, BridgeError, BridgeResult, Bus, BusConfig, BusDirection, DspKernel,
        FloatParameter, FormatError, KernelCapabilities, ParameterId, ParameterInfo,
        ParameterSnapshot, ParameterStore, ParameterValue, RenderContext, RenderStatus,
        SampleFormat, UnsupportedConfiguration,
    };
    pub use reson_kernels::{
        filter_parameters, FilterKernel, FilterMode, PassthroughKernel, PARAM_CUTOFF,
        PARAM_RESONANCE,
    };
}
