//! Bentley Scan
//!
//! Directory discovery for cover art preparation.
//!
//! This crate provides:
//! - A lazy, depth-first walk over a music root
//! - Pruning of hidden directories (and everything below them)
//! - Per-directory selection of the first matching audio file
//!
//! # Example
//!
//! ```rust,no_run
//! use bentley_scan::DirectoryScan;
//! use std::path::Path;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! for album in DirectoryScan::new(Path::new("/music"))? {
//!     println!("{} -> {}", album.path().display(), album.selected().display());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod scanner;

pub use error::{Result, ScanError};
pub use scanner::{AlbumDirectory, DirectoryScan, ScanConfig};
