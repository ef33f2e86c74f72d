//! Parameter value storage with lock-free atomic publication.
//!
//! [`FloatParameter`] pairs an immutable [`ParameterInfo`] descriptor with
//! an `AtomicU64` holding the normalized value's bit pattern. Writers (any
//! control context) and the single render-context reader never block each
//! other: a store/load of the full 64-bit pattern can never produce a torn
//! value, and `Relaxed` ordering is sufficient because no other memory is
//! published through the parameter.
//!
//! The guarantee is eventual visibility within one block's latency, not
//! linearizable ordering across parameters: two values written "at the same
//! time" may land in the same snapshot or in consecutive ones.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::parameter_info::{ParameterInfo, ParameterUnit};
use crate::parameter_range::{LinearMapper, LogMapper, RangeMapper};
use crate::types::{ParameterId, ParameterValue};

/// Continuous float parameter with encapsulated atomic storage.
///
/// # Example
///
/// ```
/// use reson_core::parameter_types::FloatParameter;
///
/// let cutoff = FloatParameter::hz("Cutoff", 400.0, 12.0..=20_000.0).with_id(0);
/// cutoff.set(1_000.0);
/// assert!((cutoff.get() - 1_000.0).abs() < 1e-6);
/// ```
pub struct FloatParameter {
    /// Descriptor (id, name, unit, default). Immutable after registration.
    info: ParameterInfo,
    /// Normalized value (0.0–1.0) as an `f64` bit pattern.
    value: AtomicU64,
    /// Normalized ↔ plain conversion.
    range: Box<dyn RangeMapper>,
}

impl FloatParameter {
    /// Generic parameter with linear mapping.
    ///
    /// The id defaults to 0; set it with [`with_id`](Self::with_id) before
    /// registering the parameter in a store.
    pub fn new(name: &'static str, default: f64, range: RangeInclusive<f64>) -> Self {
        let mapper = LinearMapper::new(range);
        Self::from_parts(name, default, Box::new(mapper), ParameterUnit::Generic, "")
    }

    /// Frequency parameter in Hertz with logarithmic mapping.
    pub fn hz(name: &'static str, default_hz: f64, range_hz: RangeInclusive<f64>) -> Self {
        let mapper = LogMapper::new(range_hz);
        Self::from_parts(name, default_hz, Box::new(mapper), ParameterUnit::Hertz, "Hz")
    }

    /// Level parameter in decibels with linear mapping over the dB range.
    pub fn db(name: &'static str, default_db: f64, range_db: RangeInclusive<f64>) -> Self {
        let mapper = LinearMapper::new(range_db);
        Self::from_parts(name, default_db, Box::new(mapper), ParameterUnit::Decibels, "dB")
    }

    /// Percentage parameter (0–100).
    pub fn percent(name: &'static str, default: f64) -> Self {
        let mapper = LinearMapper::new(0.0..=100.0);
        Self::from_parts(name, default, Box::new(mapper), ParameterUnit::Percent, "%")
    }

    fn from_parts(
        name: &'static str,
        default: f64,
        range: Box<dyn RangeMapper>,
        unit: ParameterUnit,
        units: &'static str,
    ) -> Self {
        let default_normalized = range.normalize(default);
        Self {
            info: ParameterInfo::new(0, name)
                .with_unit(unit)
                .with_units(units)
                .with_default(default_normalized),
            value: AtomicU64::new(default_normalized.to_bits()),
            range,
        }
    }

    /// Set the parameter id.
    pub fn with_id(mut self, id: ParameterId) -> Self {
        self.info.id = id;
        self
    }

    /// Set the short display name.
    pub fn with_short_name(mut self, short_name: &'static str) -> Self {
        self.info = self.info.with_short_name(short_name);
        self
    }

    /// The parameter's descriptor.
    pub fn info(&self) -> &ParameterInfo {
        &self.info
    }

    /// The parameter's stable id.
    #[inline]
    pub fn id(&self) -> ParameterId {
        self.info.id
    }

    /// The plain-value range as `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        self.range.range()
    }

    /// The default value in plain units.
    pub fn default_plain(&self) -> f64 {
        self.range.denormalize(self.info.default_normalized)
    }

    // === Value access ===

    /// Current plain value in natural units. Lock-free, render-safe.
    #[inline]
    pub fn get(&self) -> f64 {
        let normalized = f64::from_bits(self.value.load(Ordering::Relaxed));
        self.range.denormalize(normalized)
    }

    /// Set the plain value. Out-of-range values are clamped to the
    /// descriptor's range; a NaN write is ignored, keeping the previous
    /// value. Lock-free, callable from any thread.
    #[inline]
    pub fn set(&self, value: f64) {
        if value.is_nan() {
            return;
        }
        let normalized = self.range.normalize(self.range.clamp(value));
        self.value.store(normalized.to_bits(), Ordering::Relaxed);
    }

    /// Current normalized value (0.0–1.0). Lock-free, render-safe.
    #[inline]
    pub fn get_normalized(&self) -> ParameterValue {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }

    /// Set the normalized value, clamped to 0.0–1.0. A NaN write is
    /// ignored. Lock-free.
    #[inline]
    pub fn set_normalized(&self, value: ParameterValue) {
        if value.is_nan() {
            return;
        }
        self.value
            .store(value.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    /// Convert a normalized value to plain units.
    pub fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue {
        self.range.denormalize(normalized)
    }

    /// Convert a plain value to normalized form.
    pub fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue {
        self.range.normalize(plain)
    }

    /// Restore the default value.
    pub fn reset_to_default(&self) {
        self.value
            .store(self.info.default_normalized.to_bits(), Ordering::Relaxed);
    }
}

// FloatParameter is Send + Sync because AtomicU64 is, and RangeMapper
// requires Send + Sync. The compiler verifies this; no unsafe impl needed.
