//! Biquad filter kernels.
//!
//! [`FilterKernel`] is an n-channel second-order filter with two
//! automatable parameters: `cutoff` (Hz, log-mapped) and `resonance` (dB).
//! Coefficients are recomputed at block rate when either parameter moved
//! since the last block; the cutoff path is smoothed so automation sweeps
//! do not zipper.

use reson_core::{
    DspKernel, FloatParameter, KernelCapabilities, ParameterId, ParameterSnapshot, ParameterStore,
    Smoother, SmoothingStyle, UnsupportedConfiguration,
};

use crate::biquad::{BiquadSection, Coefficients};

/// Parameter id of the cutoff/center frequency in Hz.
pub const PARAM_CUTOFF: ParameterId = 0;
/// Parameter id of the resonance in dB.
pub const PARAM_RESONANCE: ParameterId = 1;

/// Cutoff range in Hz.
pub const CUTOFF_RANGE: std::ops::RangeInclusive<f64> = 12.0..=20_000.0;
/// Default cutoff in Hz.
pub const DEFAULT_CUTOFF: f64 = 400.0;
/// Resonance range in dB.
pub const RESONANCE_RANGE: std::ops::RangeInclusive<f64> = -20.0..=20.0;
/// Default resonance in dB.
pub const DEFAULT_RESONANCE: f64 = 0.0;

/// The parameter set a [`FilterKernel`] reads from its snapshots.
pub fn filter_parameters() -> ParameterStore {
    ParameterStore::new(vec![
        FloatParameter::hz("Cutoff", DEFAULT_CUTOFF, CUTOFF_RANGE).with_id(PARAM_CUTOFF),
        FloatParameter::db("Resonance", DEFAULT_RESONANCE, RESONANCE_RANGE)
            .with_short_name("Res")
            .with_id(PARAM_RESONANCE),
    ])
}

/// Filter transfer-function family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    LowPass,
    BandPass,
}

/// N-channel biquad filter kernel.
pub struct FilterKernel {
    mode: FilterMode,
    sample_rate: f64,
    /// One section per channel. Allocated by `prepare`, released by
    /// `teardown`.
    sections: Vec<BiquadSection>,
    cutoff: Smoother,
    /// Cutoff/resonance values the current coefficients were computed
    /// from; used to skip recomputation when nothing moved.
    applied_cutoff: f64,
    applied_resonance: f64,
}

impl FilterKernel {
    pub fn new(mode: FilterMode) -> Self {
        let mut cutoff = Smoother::new(SmoothingStyle::Exponential(5.0));
        cutoff.reset(DEFAULT_CUTOFF);
        Self {
            mode,
            sample_rate: 0.0,
            sections: Vec::new(),
            cutoff,
            applied_cutoff: f64::NAN,
            applied_resonance: f64::NAN,
        }
    }

    pub fn low_pass() -> Self {
        Self::new(FilterMode::LowPass)
    }

    pub fn band_pass() -> Self {
        Self::new(FilterMode::BandPass)
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Highest cutoff the current sample rate can represent cleanly.
    #[inline]
    fn cutoff_ceiling(&self) -> f64 {
        self.sample_rate * 0.49
    }

    fn compute_coefficients(&self, cutoff: f64, resonance_db: f64) -> Coefficients {
        // Resonance maps onto Q relative to the Butterworth baseline:
        // 0 dB -> 0.707, +20 dB -> ~7.07, -20 dB -> ~0.07.
        let q = std::f64::consts::FRAC_1_SQRT_2 * 10f64.powf(resonance_db / 20.0);
        match self.mode {
            FilterMode::LowPass => Coefficients::low_pass(self.sample_rate, cutoff, q),
            FilterMode::BandPass => Coefficients::band_pass(self.sample_rate, cutoff, q),
        }
    }
}

impl DspKernel for FilterKernel {
    fn capabilities(&self) -> KernelCapabilities {
        KernelCapabilities::default()
    }

    fn prepare(
        &mut self,
        sample_rate: f64,
        channel_count: usize,
    ) -> Result<(), UnsupportedConfiguration> {
        let capabilities = self.capabilities();
        if !capabilities.supports(sample_rate, channel_count as u32) {
            return Err(UnsupportedConfiguration {
                sample_rate,
                channel_count: channel_count as u32,
            });
        }

        self.sample_rate = sample_rate;
        self.sections.clear();
        self.sections
            .resize_with(channel_count, BiquadSection::new);
        self.cutoff.set_sample_rate(sample_rate);
        // Force a coefficient computation on the first block.
        self.applied_cutoff = f64::NAN;
        self.applied_resonance = f64::NAN;
        Ok(())
    }

    fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
        self.cutoff.reset(self.cutoff.current());
    }

    fn process(
        &mut self,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frames: usize,
        parameters: &ParameterSnapshot,
    ) {
        let target_cutoff = parameters
            .get_or(PARAM_CUTOFF, DEFAULT_CUTOFF)
            .min(self.cutoff_ceiling());
        let resonance = parameters.get_or(PARAM_RESONANCE, DEFAULT_RESONANCE);

        // Block-rate smoothing: advance the ramp by one block and compute
        // coefficients once from the settled value. Bounded regardless of
        // how far the parameter jumped.
        self.cutoff.set_target(target_cutoff);
        self.cutoff.skip(frames);
        let cutoff = self.cutoff.current();

        if cutoff != self.applied_cutoff || resonance != self.applied_resonance {
            let coefficients = self.compute_coefficients(cutoff, resonance);
            for section in &mut self.sections {
                section.set_coefficients(coefficients);
            }
            self.applied_cutoff = cutoff;
            self.applied_resonance = resonance;
        }

        for (channel, (input, output)) in inputs.iter().zip(outputs.iter_mut()).enumerate() {
            let Some(section) = self.sections.get_mut(channel) else {
                break;
            };
            for frame in 0..frames {
                output[frame] = section.process(input[frame]);
            }
        }
    }

    fn teardown(&mut self) {
        self.sections = Vec::new();
        self.sample_rate = 0.0;
    }
}
