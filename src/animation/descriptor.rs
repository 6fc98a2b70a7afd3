use std::collections::BTreeMap;

use crate::foundation::error::{TexAnimError, TexAnimResult};

/// Declarative rule mapping the frames of a vertical spritesheet onto a rectangle of a target
/// image over time.
///
/// Frames are `width x height` cells stacked top to bottom in the source image. Durations are in
/// ticks.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDescriptor {
    /// Id of the spritesheet image.
    #[serde(rename = "from")]
    pub source: String,
    /// Id of the image the frames are drawn onto.
    #[serde(rename = "to")]
    pub target: String,
    /// Left edge of the target rectangle.
    pub x: u32,
    /// Top edge of the target rectangle.
    pub y: u32,
    /// Frame cell width (> 0).
    #[serde(rename = "w")]
    pub width: u32,
    /// Frame cell height (> 0).
    #[serde(rename = "h")]
    pub height: u32,
    /// Ticks each frame is shown unless overridden in `frame_durations`.
    #[serde(default = "default_frame_duration")]
    pub duration: u32,
    /// Cross-fade from each frame to the next instead of cutting.
    #[serde(default)]
    pub interpolate: bool,
    /// Ticks each frame is held before the cross-fade starts.
    #[serde(default, rename = "skip")]
    pub interpolation_delay: u32,
    /// Logical frame index -> spritesheet frame index.
    #[serde(default, rename = "tiles")]
    pub frame_mapping: BTreeMap<u32, u32>,
    /// Logical frame index -> duration override.
    #[serde(default, rename = "durations")]
    pub frame_durations: BTreeMap<u32, u32>,
}

fn default_frame_duration() -> u32 {
    1
}

impl AnimationDescriptor {
    /// Descriptor drawing `width x height` frames of `source` at the origin of `target`, one tick
    /// per frame, no remapping.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            x: 0,
            y: 0,
            width,
            height,
            duration: default_frame_duration(),
            interpolate: false,
            interpolation_delay: 0,
            frame_mapping: BTreeMap::new(),
            frame_durations: BTreeMap::new(),
        }
    }

    /// Place the target rectangle at `(x, y)`.
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the default frame duration.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Enable cross-fading, holding each frame for `delay` ticks first.
    pub fn interpolated(mut self, delay: u32) -> Self {
        self.interpolate = true;
        self.interpolation_delay = delay;
        self
    }

    /// Show spritesheet frame `to` at logical frame `frame`.
    pub fn map_frame(mut self, frame: u32, to: u32) -> Self {
        self.frame_mapping.insert(frame, to);
        self
    }

    /// Override the duration of logical frame `frame`.
    pub fn frame_duration(mut self, frame: u32, duration: u32) -> Self {
        self.frame_durations.insert(frame, duration);
        self
    }

    /// Highest logical frame index named by either the mapping or the duration overrides.
    pub fn greatest_used_frame(&self) -> Option<u32> {
        self.frame_mapping
            .keys()
            .chain(self.frame_durations.keys())
            .copied()
            .max()
    }

    /// Duration of logical frame `frame`.
    pub fn duration_of(&self, frame: u32) -> u32 {
        self.frame_durations
            .get(&frame)
            .copied()
            .unwrap_or(self.duration)
    }

    /// Check the geometry and timing that does not depend on the source image.
    pub fn validate(&self) -> TexAnimResult<()> {
        if self.source.trim().is_empty() {
            return Err(TexAnimError::descriptor("source id must be non-empty"));
        }
        if self.target.trim().is_empty() {
            return Err(TexAnimError::descriptor("target id must be non-empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(TexAnimError::descriptor(format!(
                "frame size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.duration == 0 {
            return Err(TexAnimError::descriptor("duration must be > 0"));
        }
        if let Some((frame, _)) = self.frame_durations.iter().find(|(_, d)| **d == 0) {
            return Err(TexAnimError::descriptor(format!(
                "duration of frame {frame} must be > 0"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/descriptor.rs"]
mod tests;
