//! Scoped render sessions.
//!
//! [`RenderSession`] wraps the allocate/deallocate pair in RAII: resources
//! acquired when the session begins are released on every exit path —
//! normal drop, early return, or unwinding — so repeated start/stop cycles
//! cannot leak kernel state.

use std::ops::{Deref, DerefMut};

use reson_core::{BridgeResult, DspKernel};

use crate::bridge::RenderBridge;

/// A live rendering session. Dereferences to the bridge, so render calls
/// and parameter access go through the session while it exists.
pub struct RenderSession<'a, K: DspKernel> {
    bridge: &'a mut RenderBridge<K>,
}

impl<'a, K: DspKernel> RenderSession<'a, K> {
    /// Allocate render resources and open a session.
    ///
    /// On failure nothing is held: allocation errors roll the bridge back
    /// to its unallocated state before this returns.
    pub fn begin(bridge: &'a mut RenderBridge<K>) -> BridgeResult<Self> {
        bridge.allocate()?;
        Ok(Self { bridge })
    }

    /// End the session early. Equivalent to dropping it.
    pub fn end(self) {}
}

impl<K: DspKernel> Deref for RenderSession<'_, K> {
    type Target = RenderBridge<K>;

    fn deref(&self) -> &Self::Target {
        self.bridge
    }
}

impl<K: DspKernel> DerefMut for RenderSession<'_, K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bridge
    }
}

impl<K: DspKernel> Drop for RenderSession<'_, K> {
    fn drop(&mut self) {
        self.bridge.deallocate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingKernel;
    use reson_core::{BusConfig, ParameterStore, RenderContext};
    use std::sync::atomic::Ordering;

    fn counting_bridge() -> (RenderBridge<CountingKernel>, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        let (kernel, live) = CountingKernel::new();
        let bridge = RenderBridge::with_bus_config(
            kernel,
            ParameterStore::none(),
            BusConfig::stereo_throughput(48_000.0, 512),
        );
        (bridge, live)
    }

    #[test]
    fn session_releases_resources_on_drop() {
        let (mut bridge, live) = counting_bridge();
        {
            let session = RenderSession::begin(&mut bridge).unwrap();
            assert!(session.is_allocated());
            assert_eq!(live.load(Ordering::SeqCst), 1);
        }
        assert!(!bridge.is_allocated());
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn repeated_sessions_return_to_baseline() {
        let (mut bridge, live) = counting_bridge();
        let input = vec![0.25f32; 128];

        for cycle in 0..10 {
            let mut session = RenderSession::begin(&mut bridge).unwrap();
            let mut left = vec![0.0f32; 128];
            let mut right = vec![0.0f32; 128];
            for block in 0..8 {
                let status = session.render(
                    &RenderContext::new((cycle * 8 + block) as f64 * 128.0, 128),
                    &[&input, &input],
                    &mut [&mut left, &mut right],
                );
                assert!(status.is_complete());
            }
            session.end();
            assert_eq!(live.load(Ordering::SeqCst), 0, "leak after cycle {}", cycle);
        }
    }

    #[test]
    fn failed_begin_holds_nothing() {
        let (kernel, live) = CountingKernel::rejecting();
        let mut bridge = RenderBridge::with_bus_config(
            kernel,
            ParameterStore::none(),
            BusConfig::stereo_throughput(48_000.0, 512),
        );
        assert!(RenderSession::begin(&mut bridge).is_err());
        assert!(!bridge.is_allocated());
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn session_released_during_unwind() {
        let (mut bridge, live) = counting_bridge();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = RenderSession::begin(&mut bridge).unwrap();
            panic!("mid-session failure");
        }));
        assert!(result.is_err());
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}
