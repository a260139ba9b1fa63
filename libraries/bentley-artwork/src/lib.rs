//! Bentley Artwork - cover art extraction and rendering
//!
//! This library pulls the first embedded picture out of a FLAC file's
//! metadata (METADATA_BLOCK_PICTURE) using Lofty, and renders it as a fixed
//! size JPEG using the `image` crate.
//!
//! # Features
//!
//! - First-picture extraction from FLAC containers
//! - Transparency flattened onto a white background
//! - Exact 800x800 Lanczos3 stretch, JPEG quality 95
//!
//! # Example
//!
//! ```no_run
//! use bentley_artwork::{processor, CoverProcessor, FlacArtworkExtractor};
//! use std::path::Path;
//!
//! let extractor = FlacArtworkExtractor::new();
//! let path = Path::new("music/album/01.flac");
//!
//! match extractor.extract(path) {
//!     Ok(Some(picture)) => {
//!         let image = processor::decode(&picture.data)?;
//!         CoverProcessor::default().save(image, Path::new("music/album/cover.jpg"))?;
//!     }
//!     Ok(None) => println!("No artwork found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok::<(), bentley_artwork::ArtworkError>(())
//! ```

mod error;
mod extractor;
pub mod processor;
mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use extractor::FlacArtworkExtractor;
pub use processor::{ColorMode, CoverProcessor, CoverSettings, JPEG_QUALITY, TARGET_SIZE};
pub use types::EmbeddedPicture;
