//! Realtime render bridge between a host audio callback and a DSP kernel.
//!
//! [`RenderBridge`] owns the bus configuration, the lock-free parameter
//! store, and the kernel lifecycle. Control-context calls (format
//! negotiation, allocation, state persistence) may allocate and log;
//! [`RenderBridge::render`] is the realtime entry point and does neither.
//! [`RenderSession`] scopes allocate/deallocate with RAII.

pub mod bridge;
pub mod session;
pub mod state;

mod lifecycle;
mod render;

pub use bridge::RenderBridge;
pub use session::RenderSession;
pub use state::STATE_VERSION;

#[cfg(test)]
pub(crate) mod testing {
    //! Instrumented kernel for lifecycle tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reson_core::{
        DspKernel, KernelCapabilities, ParameterSnapshot, UnsupportedConfiguration,
    };

    /// Kernel that counts live preparations, so tests can assert that
    /// every prepare is balanced by a teardown.
    pub struct CountingKernel {
        live: Arc<AtomicUsize>,
        reject: bool,
        prepared: bool,
    }

    impl CountingKernel {
        /// A kernel that accepts any configuration, plus its live-count.
        pub fn new() -> (Self, Arc<AtomicUsize>) {
            let live = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    live: Arc::clone(&live),
                    reject: false,
                    prepared: false,
                },
                live,
            )
        }

        /// A kernel whose prepare always fails, plus its live-count.
        pub fn rejecting() -> (Self, Arc<AtomicUsize>) {
            let (mut kernel, live) = Self::new();
            kernel.reject = true;
            (kernel, live)
        }
    }

    impl DspKernel for CountingKernel {
        fn capabilities(&self) -> KernelCapabilities {
            KernelCapabilities::default()
        }

        fn prepare(
            &mut self,
            sample_rate: f64,
            channel_count: usize,
        ) -> Result<(), UnsupportedConfiguration> {
            self.live.fetch_add(1, Ordering::SeqCst);
            self.prepared = true;
            if self.reject {
                // Leave the bookkeeping unbalanced on purpose; the caller
                // is expected to tear down after a failed prepare.
                return Err(UnsupportedConfiguration {
                    sample_rate,
                    channel_count: channel_count as u32,
                });
            }
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
            for (output, input) in outputs.iter_mut().zip(inputs.iter()) {
                output[..frames].copy_from_slice(&input[..frames]);
            }
        }

        fn teardown(&mut self) {
            if self.prepared {
                self.live.fetch_sub(1, Ordering::SeqCst);
                self.prepared = false;
            }
        }
    }
}
