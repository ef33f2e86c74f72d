//! Parameter store and per-block snapshots.
//!
//! The store holds every registered [`FloatParameter`] for the adapter's
//! lifetime and is the only state shared between the control and render
//! contexts. Writers call [`ParameterStore::set_value`] from any thread;
//! the render context calls [`ParameterStore::snapshot`] once per block.
//! Both sides are lock-free and the snapshot path performs no allocation.

use crate::parameter_types::FloatParameter;
use crate::types::{ParameterId, ParameterValue, MAX_PARAMETERS};

/// A consistent point-in-time read of all parameter values, valid for one
/// render block.
///
/// Entries are held inline (no heap) and ordered by ascending parameter id,
/// so lookup is a binary search over at most [`MAX_PARAMETERS`] entries.
/// Each value is individually consistent — never torn — but the snapshot as
/// a whole makes no cross-parameter ordering guarantee.
#[derive(Clone, Copy, Debug)]
pub struct ParameterSnapshot {
    len: usize,
    entries: [(ParameterId, ParameterValue); MAX_PARAMETERS],
}

impl ParameterSnapshot {
    /// An empty snapshot.
    pub const fn empty() -> Self {
        Self {
            len: 0,
            entries: [(0, 0.0); MAX_PARAMETERS],
        }
    }

    /// Number of captured parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Plain value for `id`, if that parameter was captured.
    #[inline]
    pub fn get(&self, id: ParameterId) -> Option<ParameterValue> {
        self.entries[..self.len]
            .binary_search_by_key(&id, |&(entry_id, _)| entry_id)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// Plain value for `id`, or `fallback` if not captured.
    #[inline]
    pub fn get_or(&self, id: ParameterId, fallback: ParameterValue) -> ParameterValue {
        self.get(id).unwrap_or(fallback)
    }

    /// Iterate over `(id, value)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, ParameterValue)> + '_ {
        self.entries[..self.len].iter().copied()
    }
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Registry of all automatable parameters.
///
/// Parameters are registered once at construction and live for the store's
/// full lifetime; descriptors are immutable afterwards. Values are read and
/// written through the parameters' atomic storage, so the store itself
/// needs no interior locking.
pub struct ParameterStore {
    /// Sorted by ascending id.
    params: Vec<FloatParameter>,
}

impl ParameterStore {
    /// Create a store from a set of parameters.
    ///
    /// # Panics
    ///
    /// Panics on duplicate ids or more than [`MAX_PARAMETERS`] parameters.
    /// The parameter set is a build-time constant of an adapter, so either
    /// is a programming error.
    pub fn new(mut params: Vec<FloatParameter>) -> Self {
        assert!(
            params.len() <= MAX_PARAMETERS,
            "parameter count {} exceeds MAX_PARAMETERS ({})",
            params.len(),
            MAX_PARAMETERS
        );
        params.sort_by_key(|p| p.id());
        for pair in params.windows(2) {
            assert!(
                pair[0].id() != pair[1].id(),
                "duplicate parameter id {}",
                pair[0].id()
            );
        }
        Self { params }
    }

    /// An empty store, for kernels without parameters.
    pub fn none() -> Self {
        Self { params: Vec::new() }
    }

    /// Number of registered parameters.
    pub fn count(&self) -> usize {
        self.params.len()
    }

    /// Iterate over all parameters in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &FloatParameter> {
        self.params.iter()
    }

    /// Look up a parameter by id.
    pub fn by_id(&self, id: ParameterId) -> Option<&FloatParameter> {
        self.params
            .binary_search_by_key(&id, |p| p.id())
            .ok()
            .map(|index| &self.params[index])
    }

    /// Set a parameter's plain value, clamped to its declared range.
    ///
    /// Callable from any context. Returns `false` if `id` is unknown.
    pub fn set_value(&self, id: ParameterId, value: ParameterValue) -> bool {
        match self.by_id(id) {
            Some(param) => {
                param.set(value);
                true
            }
            None => false,
        }
    }

    /// Set a parameter's normalized value (0.0–1.0).
    pub fn set_normalized(&self, id: ParameterId, value: ParameterValue) -> bool {
        match self.by_id(id) {
            Some(param) => {
                param.set_normalized(value);
                true
            }
            None => false,
        }
    }

    /// Capture the most recently committed value of every parameter.
    ///
    /// Render-context safe: one relaxed atomic load per parameter, no
    /// locks, no allocation. The returned snapshot lives on the stack.
    #[inline]
    pub fn snapshot(&self) -> ParameterSnapshot {
        let mut snapshot = ParameterSnapshot::empty();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Capture into an existing snapshot, overwriting its contents.
    #[inline]
    pub fn snapshot_into(&self, snapshot: &mut ParameterSnapshot) {
        snapshot.len = self.params.len();
        for (slot, param) in snapshot.entries.iter_mut().zip(self.params.iter()) {
            *slot = (param.id(), param.get());
        }
    }

    /// Restore every parameter to its default value.
    pub fn reset_to_defaults(&self) {
        for param in &self.params {
            param.reset_to_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> ParameterStore {
        ParameterStore::new(vec![
            FloatParameter::hz("Cutoff", 400.0, 12.0..=20_000.0).with_id(0),
            FloatParameter::db("Resonance", 0.0, -20.0..=20.0).with_id(1),
        ])
    }

    #[test]
    fn snapshot_captures_defaults() {
        let store = test_store();
        let snap = store.snapshot();
        assert_eq!(snap.len(), 2);
        assert!((snap.get(0).unwrap() - 400.0).abs() < 1e-6);
        assert_eq!(snap.get(1).unwrap(), 0.0);
        assert_eq!(snap.get(99), None);
    }

    #[test]
    fn out_of_range_write_is_clamped_in_next_snapshot() {
        let store = test_store();
        assert!(store.set_value(1, 300.0));
        let snap = store.snapshot();
        assert_eq!(snap.get(1).unwrap(), 20.0);
    }

    #[test]
    fn nan_write_never_reaches_a_snapshot() {
        let store = test_store();
        store.set_value(0, 880.0);
        store.set_value(0, f64::NAN);
        store.set_normalized(1, f64::NAN);

        let snap = store.snapshot();
        let cutoff = snap.get(0).unwrap();
        let resonance = snap.get(1).unwrap();
        assert!((cutoff - 880.0).abs() < 1e-6);
        assert_eq!(resonance, 0.0);
        for (_, value) in snap.iter() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let store = test_store();
        assert!(!store.set_value(42, 1.0));
    }

    #[test]
    fn ids_are_sorted_regardless_of_registration_order() {
        let store = ParameterStore::new(vec![
            FloatParameter::new("B", 0.0, 0.0..=1.0).with_id(9),
            FloatParameter::new("A", 0.0, 0.0..=1.0).with_id(3),
        ]);
        let ids: Vec<_> = store.snapshot().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    #[should_panic(expected = "duplicate parameter id")]
    fn duplicate_ids_panic_at_registration() {
        ParameterStore::new(vec![
            FloatParameter::new("A", 0.0, 0.0..=1.0).with_id(1),
            FloatParameter::new("B", 0.0, 0.0..=1.0).with_id(1),
        ]);
    }

    #[test]
    fn snapshot_values_are_always_written_values() {
        use std::sync::Arc;

        let store = Arc::new(ParameterStore::new(vec![
            FloatParameter::new("Gain", 0.0, 0.0..=1.0).with_id(0)
        ]));
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..20_000u32 {
                    store.set_value(0, f64::from(i % 2));
                }
            })
        };
        let mut snapshot = ParameterSnapshot::empty();
        for _ in 0..20_000 {
            store.snapshot_into(&mut snapshot);
            let v = snapshot.get(0).unwrap();
            assert!(v == 0.0 || v == 1.0, "torn read: {}", v);
        }
        writer.join().unwrap();
    }
}
