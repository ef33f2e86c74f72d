//! Audio bus configuration.
//!
//! Buses describe the negotiated stream formats on the adapter's boundary:
//! how many input/output ports exist, how many channels each carries, at
//! which sample rate, and in which sample representation. Formats are
//! committed from the control context; the bridge freezes them while a
//! render session is active.

use crate::error::FormatError;
use crate::kernel::KernelCapabilities;
use crate::types::{MAX_BUSES, MAX_CHANNELS};

/// On-the-wire sample representation of a bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum SampleFormat {
    /// 32-bit float, non-interleaved. The only representation the render
    /// path currently carries.
    #[default]
    F32,
}

/// Negotiated stream format of a single bus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioFormat {
    /// Sample rate in Hz. Must be positive.
    pub sample_rate: f64,
    /// Number of channels. Must be non-zero.
    pub channel_count: u32,
    /// Sample representation.
    pub sample_format: SampleFormat,
}

impl AudioFormat {
    /// Create a new format.
    pub const fn new(sample_rate: f64, channel_count: u32, sample_format: SampleFormat) -> Self {
        Self {
            sample_rate,
            channel_count,
            sample_format,
        }
    }

    /// Stereo `f32` format at the given sample rate.
    pub const fn stereo(sample_rate: f64) -> Self {
        Self::new(sample_rate, 2, SampleFormat::F32)
    }

    /// Mono `f32` format at the given sample rate.
    pub const fn mono(sample_rate: f64) -> Self {
        Self::new(sample_rate, 1, SampleFormat::F32)
    }

    /// Check the format's basic invariants.
    pub fn validate(&self) -> Result<(), FormatError> {
        if !(self.sample_rate > 0.0) || !self.sample_rate.is_finite() {
            return Err(FormatError::InvalidFormat("sample rate must be positive"));
        }
        if self.channel_count == 0 {
            return Err(FormatError::InvalidFormat("channel count must be non-zero"));
        }
        if self.channel_count as usize > MAX_CHANNELS {
            return Err(FormatError::UnsupportedChannelCount(self.channel_count));
        }
        Ok(())
    }
}

impl Default for AudioFormat {
    /// Stereo f32 at 44.1 kHz.
    fn default() -> Self {
        Self::stereo(44_100.0)
    }
}

/// Direction of a bus relative to the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusDirection {
    Input,
    Output,
}

/// A named audio port with a negotiated format.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bus {
    pub direction: BusDirection,
    pub format: AudioFormat,
    /// Largest block the host may deliver on this bus, in frames.
    pub capacity_frames: u32,
}

impl Bus {
    pub const fn new(direction: BusDirection, format: AudioFormat, capacity_frames: u32) -> Self {
        Self {
            direction,
            format,
            capacity_frames,
        }
    }
}

/// Complete bus layout of the adapter.
///
/// Created once at construction; bus count is fixed for the adapter's
/// lifetime, only per-bus formats change afterwards. Format mutation while
/// rendering is rejected by the bridge, not here: this type has no notion
/// of lifecycle state and never touches audio data.
#[derive(Clone, Debug)]
pub struct BusConfig {
    inputs: Vec<Bus>,
    outputs: Vec<Bus>,
}

impl BusConfig {
    /// Create a bus layout.
    ///
    /// # Panics
    ///
    /// Panics if a direction declares more than [`MAX_BUSES`] buses or a
    /// bus is tagged with the wrong direction. Bus layouts are build-time
    /// constants of an adapter, so this is a programming error.
    pub fn new(inputs: Vec<Bus>, outputs: Vec<Bus>) -> Self {
        assert!(
            inputs.len() <= MAX_BUSES,
            "input bus count {} exceeds MAX_BUSES ({})",
            inputs.len(),
            MAX_BUSES
        );
        assert!(
            outputs.len() <= MAX_BUSES,
            "output bus count {} exceeds MAX_BUSES ({})",
            outputs.len(),
            MAX_BUSES
        );
        assert!(
            inputs.iter().all(|b| b.direction == BusDirection::Input),
            "input bus tagged with output direction"
        );
        assert!(
            outputs.iter().all(|b| b.direction == BusDirection::Output),
            "output bus tagged with input direction"
        );

        Self { inputs, outputs }
    }

    /// One stereo input and one stereo output bus at the given rate.
    pub fn stereo_throughput(sample_rate: f64, capacity_frames: u32) -> Self {
        let format = AudioFormat::stereo(sample_rate);
        Self::new(
            vec![Bus::new(BusDirection::Input, format, capacity_frames)],
            vec![Bus::new(BusDirection::Output, format, capacity_frames)],
        )
    }

    pub fn input_bus_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_bus_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn input_bus(&self, index: usize) -> Option<&Bus> {
        self.inputs.get(index)
    }

    pub fn output_bus(&self, index: usize) -> Option<&Bus> {
        self.outputs.get(index)
    }

    /// Replace the format of one bus after validating it against the
    /// kernel's declared capabilities.
    ///
    /// The caller (the bridge) is responsible for rejecting this while
    /// rendering is active.
    pub fn set_format(
        &mut self,
        direction: BusDirection,
        index: usize,
        format: AudioFormat,
        capabilities: &KernelCapabilities,
    ) -> Result<(), FormatError> {
        format.validate()?;
        capabilities.check_format(&format)?;

        let bus = match direction {
            BusDirection::Input => self.inputs.get_mut(index),
            BusDirection::Output => self.outputs.get_mut(index),
        };
        match bus {
            Some(bus) => {
                bus.format = format;
                Ok(())
            }
            None => Err(FormatError::NoSuchBus { direction, index }),
        }
    }

    /// Largest `capacity_frames` across all buses.
    pub fn max_capacity_frames(&self) -> u32 {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|b| b.capacity_frames)
            .max()
            .unwrap_or(0)
    }
}

impl Default for BusConfig {
    /// Stereo in/out at 44.1 kHz with 4096-frame capacity.
    fn default() -> Self {
        Self::stereo_throughput(44_100.0, 4096)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_stereo_throughput() {
        let config = BusConfig::default();
        assert_eq!(config.input_bus_count(), 1);
        assert_eq!(config.output_bus_count(), 1);
        assert_eq!(config.input_bus(0).unwrap().format.channel_count, 2);
        assert_eq!(config.output_bus(0).unwrap().format.channel_count, 2);
    }

    #[test]
    fn format_invariants() {
        assert!(AudioFormat::stereo(48_000.0).validate().is_ok());
        assert!(matches!(
            AudioFormat::new(0.0, 2, SampleFormat::F32).validate(),
            Err(FormatError::InvalidFormat(_))
        ));
        assert!(matches!(
            AudioFormat::new(48_000.0, 0, SampleFormat::F32).validate(),
            Err(FormatError::InvalidFormat(_))
        ));
        assert!(matches!(
            AudioFormat::new(48_000.0, MAX_CHANNELS as u32 + 1, SampleFormat::F32).validate(),
            Err(FormatError::UnsupportedChannelCount(_))
        ));
    }

    #[test]
    fn set_format_updates_bus() {
        let mut config = BusConfig::default();
        let caps = KernelCapabilities::default();
        let format = AudioFormat::stereo(48_000.0);
        config
            .set_format(BusDirection::Output, 0, format, &caps)
            .unwrap();
        assert_eq!(config.output_bus(0).unwrap().format, format);
    }

    #[test]
    fn set_format_rejects_missing_bus() {
        let mut config = BusConfig::default();
        let caps = KernelCapabilities::default();
        let err = config
            .set_format(BusDirection::Input, 3, AudioFormat::default(), &caps)
            .unwrap_err();
        assert!(matches!(err, FormatError::NoSuchBus { index: 3, .. }));
    }

    #[test]
    fn set_format_rejects_unsupported_channel_count() {
        let mut config = BusConfig::default();
        let caps = KernelCapabilities::new(2, 8_000.0..=192_000.0);
        let err = config
            .set_format(
                BusDirection::Input,
                0,
                AudioFormat::new(48_000.0, 4, SampleFormat::F32),
                &caps,
            )
            .unwrap_err();
        assert_eq!(err, FormatError::UnsupportedChannelCount(4));
    }
}
