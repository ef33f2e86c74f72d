//! Normalized ↔ plain value mapping.
//!
//! Hosts and automation operate in normalized 0.0–1.0 space; DSP code wants
//! plain values in natural units. A [`RangeMapper`] converts between the
//! two. Linear mapping suits gains and dB ranges; logarithmic mapping suits
//! frequencies, where equal normalized steps should cover equal octaves.

use std::ops::RangeInclusive;

/// Maps between normalized (0.0–1.0) and plain values.
///
/// Implementations must be `Send + Sync`: mappers are read concurrently
/// from control and render contexts. They must also be pure — no state, no
/// allocation — so conversion is safe anywhere, including the render path.
pub trait RangeMapper: Send + Sync {
    /// Convert a plain value to normalized 0.0–1.0. Out-of-range input is
    /// clamped.
    fn normalize(&self, plain: f64) -> f64;

    /// Convert a normalized value to a plain value. Input is clamped to
    /// 0.0–1.0 first.
    fn denormalize(&self, normalized: f64) -> f64;

    /// The plain-value range as `(min, max)`.
    fn range(&self) -> (f64, f64);

    /// Clamp a plain value into the mapper's range.
    fn clamp(&self, plain: f64) -> f64 {
        let (min, max) = self.range();
        plain.clamp(min, max)
    }
}

/// Straight-line mapping over an inclusive range.
#[derive(Clone, Copy, Debug)]
pub struct LinearMapper {
    min: f64,
    max: f64,
}

impl LinearMapper {
    pub fn new(range: RangeInclusive<f64>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

impl RangeMapper for LinearMapper {
    fn normalize(&self, plain: f64) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        ((plain - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn denormalize(&self, normalized: f64) -> f64 {
        self.min + (self.max - self.min) * normalized.clamp(0.0, 1.0)
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Logarithmic mapping over an inclusive range.
///
/// Both endpoints must be positive. Normalized position is linear in
/// `ln(plain)`, so a frequency slider spends as much travel on 100–200 Hz
/// as on 5–10 kHz.
#[derive(Clone, Copy, Debug)]
pub struct LogMapper {
    min: f64,
    max: f64,
    ln_min: f64,
    ln_ratio: f64,
}

impl LogMapper {
    /// # Panics
    ///
    /// Panics if either endpoint is not positive. Log ranges are build-time
    /// constants of a parameter declaration.
    pub fn new(range: RangeInclusive<f64>) -> Self {
        let min = *range.start();
        let max = *range.end();
        assert!(
            min > 0.0 && max > min,
            "log range requires 0 < min < max, got {}..={}",
            min,
            max
        );
        Self {
            min,
            max,
            ln_min: min.ln(),
            ln_ratio: (max / min).ln(),
        }
    }
}

impl RangeMapper for LogMapper {
    fn normalize(&self, plain: f64) -> f64 {
        let plain = plain.clamp(self.min, self.max);
        (plain.ln() - self.ln_min) / self.ln_ratio
    }

    fn denormalize(&self, normalized: f64) -> f64 {
        (self.ln_min + self.ln_ratio * normalized.clamp(0.0, 1.0)).exp()
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}
