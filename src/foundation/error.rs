/// Convenience result type used across texanim.
pub type TexAnimResult<T> = Result<T, TexAnimError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is produced at build time (descriptor resolution, decoding, config loading).
/// Per-tick operations never fail.
#[derive(thiserror::Error, Debug)]
pub enum TexAnimError {
    /// Malformed animation descriptor geometry or timing.
    #[error("descriptor error: {0}")]
    Descriptor(String),

    /// Source or target image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid user-provided data outside of a descriptor (ids, buffers, bake limits).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexAnimError {
    /// Build a [`TexAnimError::Descriptor`] value.
    pub fn descriptor(msg: impl Into<String>) -> Self {
        Self::Descriptor(msg.into())
    }

    /// Build a [`TexAnimError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TexAnimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TexAnimError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
