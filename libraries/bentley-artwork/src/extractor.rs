use crate::error::{ArtworkError, Result};
use crate::types::EmbeddedPicture;
use lofty::flac::FlacFile;
use lofty::ogg::OggPictureStorage;
use lofty::{AudioFile, ParseOptions};
use std::fs::File;
use std::path::Path;

/// Pulls the first METADATA_BLOCK_PICTURE out of FLAC files
#[derive(Debug, Clone, Copy, Default)]
pub struct FlacArtworkExtractor;

impl FlacArtworkExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the first embedded picture from a FLAC file
    ///
    /// Returns `Ok(Some(picture))` if a picture block exists, `Ok(None)` if the
    /// container has none, or `Err` if the file is missing or cannot be parsed
    /// as FLAC.
    ///
    /// Only the container order counts: the first block wins even if a later
    /// one is tagged as the front cover.
    ///
    /// # Arguments
    /// * `path` - Path to the FLAC file
    pub fn extract(&self, path: &Path) -> Result<Option<EmbeddedPicture>> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        // Audio properties are not needed, and skipping them lets files with
        // truncated frame data still yield their metadata blocks.
        let flac = {
            let mut file = File::open(path)?;
            FlacFile::read_from(&mut file, ParseOptions::new().read_properties(false))?
        };

        let Some((picture, info)) = flac.pictures().first() else {
            tracing::debug!("No picture blocks in {}", path.display());
            return Ok(None);
        };

        Ok(Some(EmbeddedPicture::from_flac_block(picture, info)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{png_bytes, FlacFixture};
    use lofty::PictureType;
    use tempfile::TempDir;

    #[test]
    fn extract_nonexistent_file_returns_error() {
        let extractor = FlacArtworkExtractor::new();
        let result = extractor.extract(Path::new("/nonexistent/file.flac"));
        assert!(matches!(result, Err(ArtworkError::FileNotFound(_))));
    }

    #[test]
    fn extract_returns_first_picture_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.flac");
        let first = png_bytes(4, 2);
        let second = png_bytes(9, 9);
        FlacFixture::new()
            .picture(PictureType::Artist, "image/png", &first, 4, 2)
            .picture(PictureType::CoverFront, "image/png", &second, 9, 9)
            .write_to(&path)
            .unwrap();

        let picture = FlacArtworkExtractor::new()
            .extract(&path)
            .unwrap()
            .expect("picture block");

        assert_eq!(picture.data, first);
        assert_eq!(picture.mime_type, "image/png");
        assert_eq!(picture.picture_type, PictureType::Artist);
        assert_eq!((picture.declared_width, picture.declared_height), (4, 2));
        assert_eq!(picture.declared_color_depth, 24);
    }

    #[test]
    fn extract_without_picture_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.flac");
        FlacFixture::new().write_to(&path).unwrap();

        let result = FlacArtworkExtractor::new().extract(&path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn extract_from_non_flac_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.flac");
        std::fs::write(&path, b"definitely not a flac stream").unwrap();

        let result = FlacArtworkExtractor::new().extract(&path);
        assert!(matches!(result, Err(ArtworkError::Lofty(_))));
    }
}
