//! Bridge lifecycle state machine.
//!
//! Two-phase lifecycle around render sessions:
//! - **Unconfigured**: kernel constructed, parameters and bus formats
//!   mutable, no audio resources held
//! - **Allocated**: kernel prepared for the committed configuration, ready
//!   for render calls; the first render call marks the state as rendering
//!
//! ```text
//! Unconfigured --[allocate]--> Allocated --[first render]--> rendering
//!        ^                         |
//!        '------[deallocate]-------'
//! ```
//!
//! A second allocate without an intervening deallocate is rejected and
//! leaves the first allocation intact. A failed allocate rolls back to
//! `Unconfigured` with the kernel torn down, so no partially-initialized
//! kernel state is ever reachable from a later render call.

use reson_core::{BridgeError, BridgeResult, DspKernel};

/// Lifecycle states. The `Transitioning` variant only exists to satisfy
/// ownership rules while moving the kernel between states and is never
/// observable across a call boundary.
pub(crate) enum BridgeState<K: DspKernel> {
    /// No render resources held.
    Unconfigured { kernel: K },

    /// Kernel prepared, render resources live.
    Allocated {
        kernel: K,
        sample_rate: f64,
        channel_count: usize,
        max_frames: usize,
        /// Set by the first render call of the session; cleared by
        /// deallocate. While set, bus formats are immutable.
        rendering: bool,
    },

    /// Temporary state during transitions.
    Transitioning,
}

impl<K: DspKernel> BridgeState<K> {
    pub fn new(kernel: K) -> Self {
        Self::Unconfigured { kernel }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated { .. })
    }

    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::Allocated { rendering: true, .. })
    }

    /// Sample rate of the live allocation, if any.
    pub fn sample_rate(&self) -> Option<f64> {
        match self {
            Self::Allocated { sample_rate, .. } => Some(*sample_rate),
            _ => None,
        }
    }

    /// Largest renderable block of the live allocation, if any.
    pub fn max_frames(&self) -> Option<usize> {
        match self {
            Self::Allocated { max_frames, .. } => Some(*max_frames),
            _ => None,
        }
    }

    pub fn kernel(&self) -> Option<&K> {
        match self {
            Self::Unconfigured { kernel } | Self::Allocated { kernel, .. } => Some(kernel),
            Self::Transitioning => None,
        }
    }

    pub fn kernel_mut(&mut self) -> Option<&mut K> {
        match self {
            Self::Unconfigured { kernel } | Self::Allocated { kernel, .. } => Some(kernel),
            Self::Transitioning => None,
        }
    }

    /// Transition `Unconfigured → Allocated`.
    pub fn allocate(
        &mut self,
        sample_rate: f64,
        channel_count: usize,
        max_frames: usize,
    ) -> BridgeResult<()> {
        match std::mem::replace(self, Self::Transitioning) {
            Self::Unconfigured { mut kernel } => match kernel.prepare(sample_rate, channel_count) {
                Ok(()) => {
                    log::debug!(
                        "allocated render resources: {} Hz, {} channels, {} max frames",
                        sample_rate,
                        channel_count,
                        max_frames
                    );
                    *self = Self::Allocated {
                        kernel,
                        sample_rate,
                        channel_count,
                        max_frames,
                        rendering: false,
                    };
                    Ok(())
                }
                Err(unsupported) => {
                    // Roll back: the kernel must not retain partial state.
                    kernel.teardown();
                    *self = Self::Unconfigured { kernel };
                    log::warn!("kernel prepare failed: {}", unsupported);
                    Err(BridgeError::Unsupported(unsupported))
                }
            },
            state @ Self::Allocated { .. } => {
                // The first allocation stays intact.
                *self = state;
                Err(BridgeError::InvalidState(
                    "allocate called while render resources are already allocated",
                ))
            }
            Self::Transitioning => Err(BridgeError::InvalidState("transitioning")),
        }
    }

    /// Transition `Allocated → Unconfigured`. No-op when already
    /// unconfigured.
    pub fn deallocate(&mut self) {
        match std::mem::replace(self, Self::Transitioning) {
            Self::Allocated { mut kernel, .. } => {
                kernel.teardown();
                log::debug!("deallocated render resources");
                *self = Self::Unconfigured { kernel };
            }
            state @ Self::Unconfigured { .. } => {
                *self = state;
            }
            Self::Transitioning => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingKernel;

    #[test]
    fn allocate_then_deallocate_round_trips() {
        let (kernel, live) = CountingKernel::new();
        let mut state = BridgeState::new(kernel);
        assert!(!state.is_allocated());

        state.allocate(48_000.0, 2, 512).unwrap();
        assert!(state.is_allocated());
        assert_eq!(state.sample_rate(), Some(48_000.0));
        assert_eq!(state.max_frames(), Some(512));
        assert_eq!(live.load(std::sync::atomic::Ordering::SeqCst), 1);

        state.deallocate();
        assert!(!state.is_allocated());
        assert_eq!(live.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn double_allocate_fails_and_keeps_first_allocation() {
        let (kernel, live) = CountingKernel::new();
        let mut state = BridgeState::new(kernel);
        state.allocate(48_000.0, 2, 512).unwrap();

        let err = state.allocate(96_000.0, 2, 1024).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidState(_)));
        // First allocation untouched.
        assert_eq!(state.sample_rate(), Some(48_000.0));
        assert_eq!(state.max_frames(), Some(512));
        assert_eq!(live.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_prepare_rolls_back_to_unconfigured() {
        let (kernel, live) = CountingKernel::rejecting();
        let mut state = BridgeState::new(kernel);

        let err = state.allocate(48_000.0, 2, 512).unwrap_err();
        assert!(matches!(err, BridgeError::Unsupported(_)));
        assert!(!state.is_allocated());
        assert_eq!(live.load(std::sync::atomic::Ordering::SeqCst), 0);

        // Recoverable: a later allocate may succeed again.
        state.deallocate();
        assert!(!state.is_allocated());
    }

    #[test]
    fn deallocate_is_idempotent() {
        let (kernel, live) = CountingKernel::new();
        let mut state = BridgeState::new(kernel);
        state.allocate(44_100.0, 1, 256).unwrap();
        state.deallocate();
        state.deallocate();
        assert_eq!(live.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
