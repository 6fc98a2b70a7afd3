use std::collections::BTreeMap;

use crate::{
    animation::descriptor::AnimationDescriptor,
    assets::source::ImageSource,
    config::{EngineConfig, PlaybackMode},
    raster::buffer::PixelBuffer,
    texture::{baked::BakedTextureAnimation, compositor::AnimatedTexture},
};

/// Suffix appended to a target id to name its animated replacement.
const ANIMATION_ID_SUFFIX: &str = "-anim";

/// Playback state of one animated target.
#[derive(Clone, Debug)]
pub enum TextureEntry {
    /// Composited on every tick.
    Live(AnimatedTexture),
    /// Precomputed frames, selected by time.
    Baked(BakedTextureAnimation),
}

/// Counts from the last [`TextureRegistry::reload`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Targets now registered.
    pub textures: usize,
    /// Animations that built successfully.
    pub animations: usize,
    /// Descriptors dropped, including every descriptor of a target whose base image failed.
    pub skipped: usize,
}

/// Every animated texture owned by one host, keyed by target id.
///
/// The registry holds no global state; hosts create one and pass it around.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: BTreeMap<String, TextureEntry>,
}

impl TextureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every texture from `descriptors` and replace the current set in one step.
    ///
    /// Descriptors are grouped by target; within a target they keep their given order. Targets
    /// whose base image cannot be loaded are left out and logged. The previous set is dropped only
    /// after the new one is complete.
    #[tracing::instrument(skip_all, fields(descriptors = descriptors.len(), mode = ?config.mode))]
    pub fn reload(
        &mut self,
        config: &EngineConfig,
        descriptors: &[AnimationDescriptor],
        source: &mut dyn ImageSource,
    ) -> ReloadSummary {
        let mut summary = ReloadSummary::default();
        let mut next = BTreeMap::new();

        if !config.animated_textures {
            tracing::debug!("animated textures disabled");
            self.entries = next;
            return summary;
        }

        for (target, group) in group_by_target(descriptors) {
            let base = match source.load(target) {
                Ok(base) => base,
                Err(e) => {
                    tracing::warn!(texture = target, error = %e, "skipping texture with unreadable base image");
                    summary.skipped += group.len();
                    continue;
                }
            };

            let mut texture = AnimatedTexture::build(target, base, &group, source);
            summary.animations += texture.animations().len();
            summary.skipped += texture.skipped().len();

            let entry = match config.mode {
                PlaybackMode::Live => TextureEntry::Live(texture),
                PlaybackMode::Baked if texture.animations().is_empty() => TextureEntry::Baked(
                    BakedTextureAnimation::pass_through(target, texture.base().clone()),
                ),
                PlaybackMode::Baked => match BakedTextureAnimation::bake(&mut texture, &config.bake) {
                    Ok(baked) => TextureEntry::Baked(baked),
                    Err(e) => {
                        tracing::warn!(texture = target, error = %e, "bake failed, playing live");
                        TextureEntry::Live(texture)
                    }
                },
            };
            next.insert(target.to_string(), entry);
        }

        summary.textures = next.len();
        self.entries = next;
        tracing::debug!(
            textures = summary.textures,
            animations = summary.animations,
            skipped = summary.skipped,
            "reloaded animated textures"
        );
        summary
    }

    /// Tick every live texture. Returns the targets whose canvas was redrawn.
    pub fn tick_all(&mut self) -> Vec<String> {
        self.entries
            .iter_mut()
            .filter_map(|(target, entry)| match entry {
                TextureEntry::Live(tex) => tex.tick().then(|| target.clone()),
                TextureEntry::Baked(_) => None,
            })
            .collect()
    }

    /// Frame to display for `target`: the live canvas, or the baked frame at `time`.
    pub fn frame_for(&self, target: &str, time: u64) -> Option<&PixelBuffer> {
        match self.entries.get(target)? {
            TextureEntry::Live(tex) => Some(tex.canvas()),
            TextureEntry::Baked(baked) => Some(baked.select_frame(time).as_ref()),
        }
    }

    /// Id under which the animated version of `target` is published, when `target` is animated.
    pub fn animation_id(&self, target: &str) -> Option<String> {
        self.entries
            .contains_key(target)
            .then(|| format!("{target}{ANIMATION_ID_SUFFIX}"))
    }

    /// Entry registered for `target`.
    pub fn get(&self, target: &str) -> Option<&TextureEntry> {
        self.entries.get(target)
    }

    /// Registered targets, sorted.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is animated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group descriptors by target, targets in first-seen order.
fn group_by_target(descriptors: &[AnimationDescriptor]) -> Vec<(&str, Vec<AnimationDescriptor>)> {
    let mut groups: Vec<(&str, Vec<AnimationDescriptor>)> = Vec::new();
    for desc in descriptors {
        match groups.iter_mut().find(|(t, _)| *t == desc.target) {
            Some((_, group)) => group.push(desc.clone()),
            None => groups.push((desc.target.as_str(), vec![desc.clone()])),
        }
    }
    groups
}

#[cfg(test)]
#[path = "../tests/unit/registry.rs"]
mod tests;
