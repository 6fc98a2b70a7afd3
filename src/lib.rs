//! texanim composites procedural texture animations.
//!
//! An [`AnimationDescriptor`] maps the frames of a vertical spritesheet onto a rectangle of a
//! target image. Descriptors are compiled into phase sequences, played back tick by tick, and
//! drawn over a pristine copy of the target.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `AnimationDescriptor + spritesheet -> Animation` (a ring of [`Phase`]s)
//! 2. **Tick**: `AnimatedTexture::tick` advances every animation on one target and redraws the
//!    canvas only when something visible changed
//! 3. **Bake** (optional): `BakedTextureAnimation::bake` precomputes the combined cycle so
//!    playback becomes a lookup by time
//!
//! [`TextureRegistry`] groups descriptors by target and rebuilds the whole set on reload.
//!
//! Every fallible step happens at build time. Ticking and frame selection never fail.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod config;
mod foundation;
mod raster;
mod registry;
mod texture;

pub use animation::descriptor::AnimationDescriptor;
pub use animation::phase::{Phase, build_phases, cycle_length, texture_frame_count};
pub use animation::timer::Animation;
pub use assets::decode::{decode_image, encode_png};
pub use assets::source::{
    FsImageSource, HOME_DIR, ImageSource, MemoryImageSource, normalize_rel_path,
    resolve_relative_id,
};
pub use config::{EngineConfig, PlaybackMode};
pub use foundation::error::{TexAnimError, TexAnimResult};
pub use raster::blend::{Rgba8, blend_copy_rect, copy_rect, lerp_color, lerp_rgba};
pub use raster::buffer::{PixelBuffer, PixelFormat};
pub use registry::{ReloadSummary, TextureEntry, TextureRegistry};
pub use texture::baked::{BakeOpts, BakedTextureAnimation, FrameHandle};
pub use texture::compositor::{AnimatedTexture, SkippedAnimation};
pub use texture::cycle::{all_on_frame_zero, combined_cycle_len};
