/// Scan-specific errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ScanError`
pub type Result<T> = std::result::Result<T, ScanError>;

/// Scan error types
///
/// Only the root is checked up front; problems below it are logged and
/// skipped while walking.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Root does not exist
    #[error("Directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Root exists but is a file (or something else)
    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
