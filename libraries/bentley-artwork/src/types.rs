use lofty::{Picture, PictureInformation, PictureType};

/// Default MIME type when a PICTURE block declares none
const FALLBACK_MIME: &str = "image/jpeg";

/// First picture block pulled out of an audio file's metadata
#[derive(Debug, Clone)]
pub struct EmbeddedPicture {
    /// Raw image bytes, exactly as stored in the container
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
    /// Picture role declared by the container (front cover, artist, ...)
    pub picture_type: PictureType,
    /// Width the container claims; 0 when unset
    pub declared_width: u32,
    /// Height the container claims; 0 when unset
    pub declared_height: u32,
    /// Colour depth in bits per pixel; 0 when unset
    pub declared_color_depth: u32,
}

impl EmbeddedPicture {
    /// Create a picture from raw bytes with no declared dimensions
    pub fn new(data: Vec<u8>, mime_type: String) -> Self {
        Self {
            data,
            mime_type,
            picture_type: PictureType::Other,
            declared_width: 0,
            declared_height: 0,
            declared_color_depth: 0,
        }
    }

    pub(crate) fn from_flac_block(picture: &Picture, info: &PictureInformation) -> Self {
        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());

        Self {
            data: picture.data().to_vec(),
            mime_type,
            picture_type: picture.pic_type(),
            declared_width: info.width,
            declared_height: info.height,
            declared_color_depth: info.color_depth,
        }
    }
}
