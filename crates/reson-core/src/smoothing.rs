//! Parameter smoothing to avoid zipper noise.
//!
//! A [`Smoother`] ramps from its current value toward a target over a
//! configured time. Kernels own their smoothers and advance them on the
//! render path; every operation here is allocation-free and bounded.

/// How a smoother interpolates toward its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SmoothingStyle {
    /// No smoothing: the target is adopted immediately.
    None,
    /// Straight-line ramp over the given time in milliseconds.
    Linear(f64),
    /// One-pole exponential approach with the given time constant in
    /// milliseconds.
    Exponential(f64),
}

/// Ramps a value toward a target.
#[derive(Clone, Debug)]
pub struct Smoother {
    style: SmoothingStyle,
    sample_rate: f64,
    current: f64,
    target: f64,
    /// Per-sample increment (linear) — recomputed when the target changes.
    step: f64,
    /// Remaining samples in the ramp (linear).
    remaining: u32,
    /// Per-sample coefficient (exponential).
    coeff: f64,
}

impl Smoother {
    pub fn new(style: SmoothingStyle) -> Self {
        let mut smoother = Self {
            style,
            sample_rate: 44_100.0,
            current: 0.0,
            target: 0.0,
            step: 0.0,
            remaining: 0,
            coeff: 0.0,
        };
        smoother.update_coeff();
        smoother
    }

    fn update_coeff(&mut self) {
        if let SmoothingStyle::Exponential(ms) = self.style {
            let samples = (ms / 1000.0 * self.sample_rate).max(1.0);
            // Reaches ~99.99% of the target within the configured time.
            self.coeff = (-4.0 * std::f64::consts::LN_10 / samples).exp();
        }
    }

    /// Set the sample rate the ramp times are computed against.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.update_coeff();
        self.retarget();
    }

    /// Jump to a value with no ramp. Used after prepare and state loads.
    pub fn reset(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.remaining = 0;
        self.step = 0.0;
    }

    /// Set a new target to ramp toward. A target equal to the current one
    /// cancels any in-flight ramp.
    pub fn set_target(&mut self, target: f64) {
        if target == self.target {
            return;
        }
        self.target = target;
        self.retarget();
    }

    fn retarget(&mut self) {
        match self.style {
            SmoothingStyle::None => {
                self.current = self.target;
                self.remaining = 0;
            }
            SmoothingStyle::Linear(ms) => {
                let samples = (ms / 1000.0 * self.sample_rate).max(1.0) as u32;
                self.remaining = samples;
                self.step = (self.target - self.current) / samples as f64;
            }
            SmoothingStyle::Exponential(_) => {}
        }
    }

    /// The current value without advancing.
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn tick(&mut self) -> f64 {
        match self.style {
            SmoothingStyle::None => self.current = self.target,
            SmoothingStyle::Linear(_) => {
                if self.remaining > 0 {
                    self.current += self.step;
                    self.remaining -= 1;
                    if self.remaining == 0 {
                        self.current = self.target;
                    }
                }
            }
            SmoothingStyle::Exponential(_) => {
                self.current = self.target + (self.current - self.target) * self.coeff;
            }
        }
        self.current
    }

    /// Advance by `samples` without observing intermediate values.
    pub fn skip(&mut self, samples: usize) {
        match self.style {
            SmoothingStyle::None => self.current = self.target,
            SmoothingStyle::Linear(_) => {
                let n = (samples as u32).min(self.remaining);
                self.current += self.step * n as f64;
                self.remaining -= n;
                if self.remaining == 0 {
                    self.current = self.target;
                }
            }
            SmoothingStyle::Exponential(_) => {
                self.current =
                    self.target + (self.current - self.target) * self.coeff.powi(samples as i32);
            }
        }
    }

    /// Whether a ramp is still in flight.
    pub fn is_smoothing(&self) -> bool {
        match self.style {
            SmoothingStyle::None => false,
            SmoothingStyle::Linear(_) => self.remaining > 0,
            SmoothingStyle::Exponential(_) => (self.current - self.target).abs() > 1e-10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_style_jumps() {
        let mut s = Smoother::new(SmoothingStyle::None);
        s.reset(0.0);
        s.set_target(1.0);
        assert_eq!(s.tick(), 1.0);
        assert!(!s.is_smoothing());
    }

    #[test]
    fn linear_reaches_target_exactly() {
        let mut s = Smoother::new(SmoothingStyle::Linear(1.0));
        s.set_sample_rate(1000.0); // 1ms ramp = 1 sample at 1kHz
        s.reset(0.0);
        s.set_target(2.0);
        assert_eq!(s.tick(), 2.0);
    }

    #[test]
    fn linear_ramp_is_monotonic() {
        let mut s = Smoother::new(SmoothingStyle::Linear(10.0));
        s.set_sample_rate(48_000.0);
        s.reset(0.0);
        s.set_target(1.0);
        let mut last = 0.0;
        for _ in 0..480 {
            let v = s.tick();
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn exponential_converges() {
        let mut s = Smoother::new(SmoothingStyle::Exponential(5.0));
        s.set_sample_rate(48_000.0);
        s.reset(0.0);
        s.set_target(1.0);
        s.skip(48_000);
        assert!((s.current() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn skip_matches_tick() {
        let mut a = Smoother::new(SmoothingStyle::Exponential(5.0));
        let mut b = a.clone();
        a.reset(0.0);
        b.reset(0.0);
        a.set_target(1.0);
        b.set_target(1.0);
        for _ in 0..128 {
            a.tick();
        }
        b.skip(128);
        assert!((a.current() - b.current()).abs() < 1e-9);
    }
}
