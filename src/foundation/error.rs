/// Convenience result type used across stickerkit.
pub type StickerResult<T> = Result<T, StickerError>;

/// Top-level error taxonomy used by the sticker APIs.
///
/// Most sticker paths absorb failures as silent fallbacks; these variants cover API misuse,
/// invalid configuration and IO problems that the caller has to see.
#[derive(thiserror::Error, Debug)]
pub enum StickerError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while laying out or rasterizing stickers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while decoding sticker image bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors reported by a chartlet provider or image loader.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickerError {
    /// Build a [`StickerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StickerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StickerError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StickerError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`StickerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
