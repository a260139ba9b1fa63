use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting or rendering cover art
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error("Metadata error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    /// Image decode, resize or encode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Target dimensions or quality outside the encoder's range
    #[error("Invalid cover settings: {0}")]
    InvalidSettings(String),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
