use crate::{
    animation::{
        descriptor::AnimationDescriptor,
        phase::{Phase, build_phases},
    },
    foundation::error::{TexAnimError, TexAnimResult},
    raster::buffer::{PixelBuffer, PixelFormat},
};

/// Runtime instance of one descriptor: owns its spritesheet and walks the phase ring one tick at
/// a time.
///
/// The frame counter always stays in `[0, cycle_len)`; advancing past the last phase wraps to the
/// first.
#[derive(Clone, Debug)]
pub struct Animation {
    source: PixelBuffer,
    phases: Vec<Phase>,
    /// Exclusive end tick of each phase, ascending.
    phase_ends: Vec<u32>,
    target_x: u32,
    target_y: u32,
    width: u32,
    height: u32,

    frame: u32,
    current: usize,
    phase_frame: u32,
    changed: bool,
}

impl Animation {
    /// Build the phase sequence of `desc` and take ownership of its decoded spritesheet.
    #[tracing::instrument(skip_all, fields(source = %desc.source, texture = %desc.target))]
    pub fn build(desc: &AnimationDescriptor, source: PixelBuffer) -> TexAnimResult<Self> {
        if desc.width > source.width() {
            return Err(TexAnimError::descriptor(format!(
                "frame width {} exceeds spritesheet width {}",
                desc.width,
                source.width()
            )));
        }
        let phases = build_phases(desc, source.height())?;

        let mut end = 0u32;
        let phase_ends = phases
            .iter()
            .map(|p| {
                end += p.duration();
                end
            })
            .collect();

        let mut anim = Self {
            source,
            phases,
            phase_ends,
            target_x: desc.x,
            target_y: desc.y,
            width: desc.width,
            height: desc.height,
            frame: 0,
            current: 0,
            phase_frame: 0,
            changed: true,
        };
        anim.update_current_phase(None);
        tracing::debug!(
            phases = anim.phases.len(),
            cycle_len = anim.cycle_len(),
            "built animation"
        );
        Ok(anim)
    }

    /// Move one tick forward, wrapping to frame 0 at the end of the cycle.
    pub fn advance(&mut self) {
        self.frame += 1;
        if self.frame >= self.cycle_len() {
            self.frame = 0;
        }
        self.update_current_phase(Some(self.current));
    }

    /// Return to frame 0 as if freshly built; the next draw reports a change.
    pub fn rewind(&mut self) {
        self.frame = 0;
        self.update_current_phase(None);
    }

    /// `true` when the drawn output differs from the previous tick: the current phase was just
    /// entered, or it is a cross-fade between two distinct rows.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// `true` at the start of a cycle.
    pub fn is_on_frame_zero(&self) -> bool {
        self.frame == 0
    }

    /// Ticks in one full cycle (sum of phase durations).
    pub fn cycle_len(&self) -> u32 {
        self.phase_ends.last().copied().unwrap_or(1)
    }

    /// Position inside the cycle, in `[0, cycle_len)`.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Phase active at the current tick.
    pub fn current_phase(&self) -> &Phase {
        &self.phases[self.current]
    }

    /// Index of the current phase.
    pub fn current_phase_index(&self) -> usize {
        self.current
    }

    /// Ticks elapsed since the current phase began.
    pub fn phase_frame(&self) -> u32 {
        self.phase_frame
    }

    /// The full phase sequence.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Decoded spritesheet.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Target rectangle as `(x, y, width, height)`.
    pub fn target_rect(&self) -> (u32, u32, u32, u32) {
        (self.target_x, self.target_y, self.width, self.height)
    }

    pub(crate) fn convert_source(&mut self, format: PixelFormat) {
        if self.source.format() != format {
            self.source = self.source.to_format(format);
        }
    }

    fn update_current_phase(&mut self, previous: Option<usize>) {
        let idx = self.phase_ends.partition_point(|&end| end <= self.frame);
        let start = if idx == 0 { 0 } else { self.phase_ends[idx - 1] };

        self.current = idx;
        self.phase_frame = self.frame - start;
        self.changed = previous != Some(idx) || self.phases[idx].has_changing_v();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timer.rs"]
mod tests;
