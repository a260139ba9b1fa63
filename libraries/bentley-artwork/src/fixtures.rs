//! In-memory builders for FLAC containers and source images
//!
//! The FLAC files produced here carry a valid STREAMINFO block and any number
//! of PICTURE blocks, but no audio frames. That is enough for the metadata
//! parser, which stops after the last metadata block.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use lofty::PictureType;
use std::io::{self, Cursor};
use std::path::Path;

const STREAMINFO: u8 = 0;
const PICTURE: u8 = 6;

/// Builder for a minimal FLAC file
#[derive(Debug, Default, Clone)]
pub struct FlacFixture {
    blocks: Vec<(u8, Vec<u8>)>,
}

impl FlacFixture {
    /// Start a FLAC file that only has a STREAMINFO block
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a METADATA_BLOCK_PICTURE
    pub fn picture(
        mut self,
        picture_type: PictureType,
        mime_type: &str,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        let mut block = Vec::with_capacity(32 + mime_type.len() + data.len());
        block.extend_from_slice(&u32::from(picture_type.as_u8()).to_be_bytes());
        push_len(&mut block, mime_type.len());
        block.extend_from_slice(mime_type.as_bytes());
        push_len(&mut block, 0); // description
        block.extend_from_slice(&width.to_be_bytes());
        block.extend_from_slice(&height.to_be_bytes());
        block.extend_from_slice(&24u32.to_be_bytes());
        block.extend_from_slice(&0u32.to_be_bytes());
        push_len(&mut block, data.len());
        block.extend_from_slice(data);

        self.blocks.push((PICTURE, block));
        self
    }

    /// Front cover shortcut
    pub fn cover(self, mime_type: &str, data: &[u8]) -> Self {
        self.picture(PictureType::CoverFront, mime_type, data, 0, 0)
    }

    /// Serialize to bytes
    pub fn build(&self) -> Vec<u8> {
        let mut out = b"fLaC".to_vec();
        let stream_info = stream_info();

        let mut blocks = vec![(STREAMINFO, stream_info.as_slice())];
        blocks.extend(self.blocks.iter().map(|(ty, data)| (*ty, data.as_slice())));

        let last = blocks.len() - 1;
        for (index, (ty, data)) in blocks.into_iter().enumerate() {
            let flag = if index == last { 0x80 } else { 0 };
            out.push(flag | ty);
            let len = data.len() as u32;
            out.extend_from_slice(&len.to_be_bytes()[1..]);
            out.extend_from_slice(data);
        }

        out
    }

    /// Serialize and write to `path`
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.build())
    }
}

fn push_len(buf: &mut Vec<u8>, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    buf.extend_from_slice(&len.to_be_bytes());
}

/// 44.1 kHz, stereo, 16-bit, unknown length
fn stream_info() -> [u8; 34] {
    let mut block = [0u8; 34];
    block[0..2].copy_from_slice(&4096u16.to_be_bytes());
    block[2..4].copy_from_slice(&4096u16.to_be_bytes());
    // bytes 4..10: min/max frame size left at zero (unknown)
    // 20 bits sample rate | 3 bits channels-1 | 5 bits bps-1 | 36 bits samples
    block[10..14].copy_from_slice(&[0x0A, 0xC4, 0x42, 0xF0]);
    block
}

/// Opaque RGBA gradient encoded as PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    encode(&DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// Encode any image in the given format
pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, format)
        .expect("in-memory fixture encoding");
    out.into_inner()
}
