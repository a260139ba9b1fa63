use crate::error::{ArtworkError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Output edge length in pixels
pub const TARGET_SIZE: u32 = 800;

/// JPEG quality on the 1-100 scale
pub const JPEG_QUALITY: u8 = 95;

/// Fixed render parameters for cover output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverSettings {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            width: TARGET_SIZE,
            height: TARGET_SIZE,
            quality: JPEG_QUALITY,
        }
    }
}

impl CoverSettings {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ArtworkError::InvalidSettings(format!(
                "target dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ArtworkError::InvalidSettings(format!(
                "JPEG quality must be within 1-100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Colour layout of a decoded picture
///
/// Palette-indexed PNGs never show up here: the decoder expands PLTE (and
/// tRNS) into `Rgb`/`Rgba` before handing the buffer over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
    Luma,
    LumaAlpha,
    Other,
}

impl ColorMode {
    /// Classify a decoded image
    pub fn of(image: &DynamicImage) -> Self {
        match image.color() {
            ColorType::Rgb8 => Self::Rgb,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => Self::Rgba,
            ColorType::L8 | ColorType::L16 => Self::Luma,
            ColorType::La8 | ColorType::La16 => Self::LumaAlpha,
            _ => Self::Other,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba | Self::LumaAlpha)
    }
}

/// Decode raw picture bytes; the format is sniffed from the magic bytes
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Drop transparency by compositing onto opaque white
///
/// Images without alpha are converted straight to RGB8.
pub fn flatten(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        };
    }

    let rgba = image.to_rgba8();
    let mut canvas = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));
    for (dst, src) in canvas.pixels_mut().zip(rgba.pixels()) {
        let alpha = u16::from(src[3]);
        for (out, &fg) in dst.0.iter_mut().zip(&src.0[..3]) {
            let blended = u16::from(fg) * alpha + u16::from(*out) * (255 - alpha);
            *out = ((blended + 127) / 255) as u8;
        }
    }
    canvas
}

/// Stretch to exactly `width`x`height`; aspect ratio is not preserved
pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Encode an RGB buffer as baseline JPEG
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgb8.into(),
    )?;
    Ok(out.into_inner())
}

/// Turns decoded cover art into the fixed-size JPEG written next to the audio
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverProcessor {
    settings: CoverSettings,
}

impl CoverProcessor {
    pub fn new(settings: CoverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> CoverSettings {
        self.settings
    }

    /// Flatten, resize and encode; nothing touches the filesystem
    pub fn render(&self, image: DynamicImage) -> Result<Vec<u8>> {
        self.settings.validate()?;

        let rgb = flatten(image);
        let resized = resize(&rgb, self.settings.width, self.settings.height);
        drop(rgb);

        encode_jpeg(&resized, self.settings.quality)
    }

    /// Render and write to `output_path`, replacing any existing file
    ///
    /// The JPEG is fully encoded in memory before the file is opened, so an
    /// encode failure leaves whatever was there before untouched.
    pub fn save(&self, image: DynamicImage, output_path: &Path) -> Result<()> {
        let jpeg = self.render(image)?;
        std::fs::write(output_path, &jpeg)?;
        tracing::debug!("Wrote {} bytes to {}", jpeg.len(), output_path.display());
        Ok(())
    }
}
