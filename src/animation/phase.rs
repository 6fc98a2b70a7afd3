use crate::{
    animation::descriptor::AnimationDescriptor,
    foundation::error::{TexAnimError, TexAnimResult},
};

/// One segment of an animation's cycle.
///
/// `v` values are pixel row offsets of a frame cell in the source spritesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    /// Shows the frame at row `v` for the whole duration.
    Static {
        /// Length in ticks (> 0).
        duration: u32,
        /// Source row offset.
        v: u32,
    },
    /// Cross-fades linearly from row `from_v` to row `to_v` over the duration.
    Interpolated {
        /// Length in ticks (> 0).
        duration: u32,
        /// Source row offset at blend factor 0.
        from_v: u32,
        /// Source row offset at blend factor 1.
        to_v: u32,
    },
}

impl Phase {
    /// Length in ticks.
    pub fn duration(&self) -> u32 {
        match *self {
            Self::Static { duration, .. } | Self::Interpolated { duration, .. } => duration,
        }
    }

    /// Blend factor in `[0, 1)` at `offset` ticks into the phase; always 0 for static phases.
    pub fn blend_at(&self, offset: u32) -> f32 {
        match *self {
            Self::Static { .. } => 0.0,
            Self::Interpolated { duration, .. } => (offset as f32 / duration as f32).min(1.0),
        }
    }

    /// `true` when the pixel content differs from tick to tick inside this phase.
    pub fn has_changing_v(&self) -> bool {
        match *self {
            Self::Static { .. } => false,
            Self::Interpolated { from_v, to_v, .. } => from_v != to_v,
        }
    }
}

/// Number of whole frame cells stacked in a spritesheet of `source_height` pixels.
pub fn texture_frame_count(source_height: u32, frame_height: u32) -> u32 {
    if frame_height == 0 {
        return 0;
    }
    source_height / frame_height
}

/// Build the cyclic phase sequence of `desc` for a spritesheet of `source_height` pixels.
///
/// The returned list is never empty and every phase has a positive duration.
pub fn build_phases(desc: &AnimationDescriptor, source_height: u32) -> TexAnimResult<Vec<Phase>> {
    desc.validate()?;

    let texture_frames = texture_frame_count(source_height, desc.height);
    if texture_frames == 0 {
        return Err(TexAnimError::descriptor(format!(
            "source is {source_height}px tall, smaller than one {}px frame",
            desc.height
        )));
    }
    let anim_frames = desc
        .greatest_used_frame()
        .map_or(texture_frames, |g| texture_frames.max(g.saturating_add(1)));

    // (mapped frame, duration) for every logical frame that has something to show.
    let frames: Vec<(u32, u32)> = (0..anim_frames)
        .filter(|f| *f < texture_frames || desc.frame_mapping.contains_key(f))
        .map(|f| {
            let mapped = desc.frame_mapping.get(&f).copied().unwrap_or(f);
            (mapped, desc.duration_of(f))
        })
        .collect();

    let max_v = (texture_frames - 1) * desc.height;
    let v_for = |frame: u32| frame.saturating_mul(desc.height).min(max_v);

    let mut phases = Vec::with_capacity(if desc.interpolate {
        frames.len() * 2
    } else {
        frames.len()
    });
    for (i, &(mapped, duration)) in frames.iter().enumerate() {
        let v = v_for(mapped);
        if !desc.interpolate {
            phases.push(Phase::Static { duration, v });
            continue;
        }

        let delay = desc.interpolation_delay;
        if duration <= delay {
            return Err(TexAnimError::descriptor(format!(
                "interpolation delay {delay} must be shorter than frame duration {duration}"
            )));
        }
        if delay > 0 {
            phases.push(Phase::Static { duration: delay, v });
        }
        let (next_mapped, _) = frames[(i + 1) % frames.len()];
        phases.push(Phase::Interpolated {
            duration: duration - delay,
            from_v: v,
            to_v: v_for(next_mapped),
        });
    }

    let total = cycle_length(&phases);
    if total > u64::from(u32::MAX) {
        return Err(TexAnimError::descriptor(format!(
            "cycle of {total} ticks is too long"
        )));
    }
    Ok(phases)
}

/// Sum of all phase durations, widened so arbitrary phase lists cannot overflow.
pub fn cycle_length(phases: &[Phase]) -> u64 {
    phases.iter().map(|p| u64::from(p.duration())).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
