use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    assets::decode::decode_image,
    foundation::error::{TexAnimError, TexAnimResult},
    raster::buffer::{PixelBuffer, PixelFormat},
};

/// Supplier of decoded images addressed by relative id.
///
/// Every call hands out a fresh buffer: the caller takes exclusive ownership.
pub trait ImageSource {
    /// Load and decode the image stored under `id`.
    fn load(&mut self, id: &str) -> TexAnimResult<PixelBuffer>;
}

/// Filesystem-backed [`ImageSource`] rooted at a directory.
#[derive(Clone, Debug)]
pub struct FsImageSource {
    root: PathBuf,
    format: PixelFormat,
}

impl FsImageSource {
    /// Resolve ids relative to `root`, decoding into [`PixelFormat::RGBA8`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_format(root, PixelFormat::RGBA8)
    }

    /// Resolve ids relative to `root`, decoding into `format`.
    pub fn with_format(root: impl Into<PathBuf>, format: PixelFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    /// Root directory used when resolving ids.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for FsImageSource {
    fn load(&mut self, id: &str) -> TexAnimResult<PixelBuffer> {
        let norm = normalize_rel_path(id)?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path).map_err(|e| {
            TexAnimError::decode(format!("read image '{}': {e}", path.display()))
        })?;
        decode_image(&bytes, self.format)
            .map_err(|e| TexAnimError::decode(format!("'{}': {e}", path.display())))
    }
}

/// In-memory [`ImageSource`], keyed by normalized id.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, PixelBuffer>,
}

impl MemoryImageSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: &str, image: PixelBuffer) -> TexAnimResult<()> {
        self.images.insert(normalize_rel_path(id)?, image);
        Ok(())
    }

    /// Remove the image stored under `id`.
    pub fn remove(&mut self, id: &str) -> Option<PixelBuffer> {
        let norm = normalize_rel_path(id).ok()?;
        self.images.remove(&norm)
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&mut self, id: &str) -> TexAnimResult<PixelBuffer> {
        let norm = normalize_rel_path(id)?;
        self.images
            .get(&norm)
            .cloned()
            .ok_or_else(|| TexAnimError::decode(format!("no image registered as '{norm}'")))
    }
}

/// Normalize and validate relative image ids.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> TexAnimResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(TexAnimError::validation("image ids must be relative"));
    }
    if s.is_empty() {
        return Err(TexAnimError::validation("image id must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(TexAnimError::validation("image ids must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(TexAnimError::validation("image id must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Directory that `~/` ids resolve into.
pub const HOME_DIR: &str = "optifine";

/// Resolve a descriptor id written inside the file `relative_to`.
///
/// - `./x` resolves against the directory of `relative_to`:
///   `resolve_relative_id("anim/water.json", "./water.png") == "anim/water.png"`.
/// - `~/x` resolves into [`HOME_DIR`]: `"~/anim/water.png"` becomes `"optifine/anim/water.png"`.
///
/// Other ids are returned unchanged.
pub fn resolve_relative_id(relative_to: &str, id: &str) -> String {
    if let Some(rest) = id.strip_prefix("~/") {
        return format!("{HOME_DIR}/{rest}");
    }
    let Some(rest) = id.strip_prefix("./") else {
        return id.to_string();
    };
    let base = relative_to.replace('\\', "/");
    match base.rfind('/') {
        Some(i) if i > 0 => format!("{}/{}", &base[..i], rest),
        _ => rest.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
