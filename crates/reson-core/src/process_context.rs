//! Per-call render context and in-band render status.

/// Transient data for one render call.
///
/// Everything here is borrowed from the host's timeline and valid only for
/// the duration of the call. The bridge does not measure wall-clock
/// deadlines itself; it trusts the host's report via
/// [`deadline_missed`](Self::with_deadline_missed).
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    /// Position of the block's first frame on the host timeline, in
    /// samples.
    pub sample_time: f64,
    /// Number of frames to render in this block.
    pub frames: usize,
    /// Host-reported missed deadline for this block.
    deadline_missed: bool,
}

impl RenderContext {
    pub const fn new(sample_time: f64, frames: usize) -> Self {
        Self {
            sample_time,
            frames,
            deadline_missed: false,
        }
    }

    /// Mark this block as already late according to the host.
    pub const fn with_deadline_missed(mut self, missed: bool) -> Self {
        self.deadline_missed = missed;
        self
    }

    #[inline]
    pub fn deadline_missed(&self) -> bool {
        self.deadline_missed
    }
}

/// Outcome of one render call.
///
/// Render-path failures are represented in-band; the render entry point
/// never returns `Err`, panics, or allocates. After an `Underrun` the
/// affected block carries silence and normal operation resumes on the next
/// block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum RenderStatus {
    /// The block was rendered in full.
    Complete,
    /// The block could not be completed; the output carries silence.
    Underrun,
}

impl RenderStatus {
    #[inline]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}
