use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{TexAnimError, TexAnimResult},
    texture::baked::BakeOpts,
};

/// How a [`TextureRegistry`](crate::TextureRegistry) plays animated textures back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Composite every tick.
    #[default]
    Live,
    /// Precompute the full cycle at reload and select frames by time.
    Baked,
}

/// Engine settings, read from JSON. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Master switch; when off, reload produces no animated textures.
    pub animated_textures: bool,
    /// Playback strategy.
    pub mode: PlaybackMode,
    /// Bake settings, used in [`PlaybackMode::Baked`].
    pub bake: BakeOpts,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            animated_textures: true,
            mode: PlaybackMode::Live,
            bake: BakeOpts::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> TexAnimResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TexAnimError::config(format!("invalid engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON file and parse it with [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> TexAnimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject settings that cannot produce a working engine.
    pub fn validate(&self) -> TexAnimResult<()> {
        if self.bake.max_frames == 0 {
            return Err(TexAnimError::config("bake.max_frames must be > 0"));
        }
        if self.bake.max_frames > BakeOpts::MAX_FRAMES_LIMIT {
            return Err(TexAnimError::config(format!(
                "bake.max_frames must be <= {}",
                BakeOpts::MAX_FRAMES_LIMIT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
