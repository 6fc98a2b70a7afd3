use std::{collections::HashMap, sync::Arc};

use crate::{
    foundation::error::{TexAnimError, TexAnimResult},
    raster::buffer::PixelBuffer,
    texture::compositor::AnimatedTexture,
};

/// Shared handle to one stored frame. Ticks that look the same share a handle.
pub type FrameHandle = Arc<PixelBuffer>;

/// Options for [`BakedTextureAnimation::bake`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeOpts {
    /// Store each visually distinct frame once.
    pub compact: bool,
    /// Refuse to bake textures whose combined cycle is longer than this.
    ///
    /// Values above [`BakeOpts::MAX_FRAMES_LIMIT`] are clamped to it.
    pub max_frames: u64,
}

impl BakeOpts {
    /// Hard ceiling on baked cycle length, whatever `max_frames` says.
    pub const MAX_FRAMES_LIMIT: u64 = 1 << 24;

    /// `max_frames` clamped to [`MAX_FRAMES_LIMIT`](Self::MAX_FRAMES_LIMIT).
    pub fn frame_limit(&self) -> u64 {
        self.max_frames.min(Self::MAX_FRAMES_LIMIT)
    }
}

impl Default for BakeOpts {
    fn default() -> Self {
        Self {
            compact: true,
            max_frames: 4096,
        }
    }
}

/// Every frame of a texture's combined cycle, precomputed.
#[derive(Clone, Debug)]
pub struct BakedTextureAnimation {
    target: String,
    frames: Vec<FrameHandle>,
    /// Per tick of the cycle, the index into `frames`.
    index: Vec<u32>,
}

impl BakedTextureAnimation {
    /// Run one full combined cycle of `texture` from a rewound state and capture each tick.
    ///
    /// The texture is left rewound afterwards.
    #[tracing::instrument(skip_all, fields(texture = %texture.target()))]
    pub fn bake(texture: &mut AnimatedTexture, opts: &BakeOpts) -> TexAnimResult<Self> {
        let cycle_len = texture.cycle_len();
        let limit = opts.frame_limit();
        if cycle_len > limit {
            return Err(TexAnimError::validation(format!(
                "combined cycle of {cycle_len} ticks exceeds the bake limit of {limit}"
            )));
        }

        texture.rewind();
        let mut frames: Vec<FrameHandle> = Vec::new();
        let mut index: Vec<u32> = Vec::new();
        let mut by_hash: HashMap<u64, Vec<u32>> = HashMap::new();

        for _ in 0..cycle_len {
            let redrawn = texture.tick();
            if !redrawn && opts.compact {
                if let Some(&last) = index.last() {
                    index.push(last);
                    continue;
                }
            }

            let canvas = texture.canvas();
            if opts.compact {
                let hash = canvas.fingerprint();
                let candidates = by_hash.entry(hash).or_default();
                if let Some(&i) = candidates.iter().find(|&&i| *frames[i as usize] == *canvas) {
                    index.push(i);
                    continue;
                }
                candidates.push(frames.len() as u32);
            }
            index.push(frames.len() as u32);
            frames.push(Arc::new(canvas.clone()));
        }
        texture.rewind();

        tracing::debug!(cycle_len, distinct = frames.len(), "baked texture");
        Ok(Self {
            target: texture.target().to_string(),
            frames,
            index,
        })
    }

    /// A single-frame animation that always shows `base`.
    pub fn pass_through(target: impl Into<String>, base: PixelBuffer) -> Self {
        Self {
            target: target.into(),
            frames: vec![Arc::new(base)],
            index: vec![0],
        }
    }

    /// Frame shown at `time` ticks: `frames[index[time % cycle_len]]`.
    pub fn select_frame(&self, time: u64) -> &FrameHandle {
        let tick = (time % self.index.len() as u64) as usize;
        &self.frames[self.index[tick] as usize]
    }

    /// Id of the image these frames replace.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Ticks in one cycle; the modulo base of [`select_frame`](Self::select_frame).
    pub fn cycle_len(&self) -> u64 {
        self.index.len() as u64
    }

    /// Number of stored frames.
    pub fn distinct_frames(&self) -> usize {
        self.frames.len()
    }

    /// Stored frames, in first-seen order.
    pub fn frames(&self) -> &[FrameHandle] {
        &self.frames
    }

    /// Frame index for every tick of the cycle.
    pub fn frame_indices(&self) -> &[u32] {
        &self.index
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/baked.rs"]
mod tests;
