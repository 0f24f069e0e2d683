//! Raw RGBA frames and their PNG encoding.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::gpu::readback::BYTES_PER_PIXEL;
use crate::view::RenderError;

/// zlib effort used when encoding stream frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PngCompression {
    /// Fastest encode, largest parts.
    #[default]
    Fast,
    /// zlib default level.
    Default,
    /// Smallest parts, slowest encode.
    Best,
}

impl From<PngCompression> for CompressionType {
    fn from(c: PngCompression) -> Self {
        match c {
            PngCompression::Fast => Self::Fast,
            PngCompression::Default => Self::Default,
            PngCompression::Best => Self::Best,
        }
    }
}

/// One rendered frame: tightly packed RGBA8, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap a pixel buffer, checking it holds exactly `width × height × 4`
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FrameSize`] on a length mismatch.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, RenderError> {
        let expected = Self::byte_len(width, height);
        if pixels.len() != expected {
            return Err(RenderError::FrameSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single colour.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(Self::byte_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Byte length of a `width`×`height` RGBA8 frame.
    #[must_use]
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * BYTES_PER_PIXEL as usize
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the frame as a PNG image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if the encoder rejects the buffer.
    pub fn encode_png(
        &self,
        compression: PngCompression,
    ) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::with_capacity(self.pixels.len() / 4);
        PngEncoder::new_with_quality(
            &mut out,
            compression.into(),
            FilterType::Adaptive,
        )
        .write_image(
            &self.pixels,
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(RenderError::Encode)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        let err = Frame::new(4, 4, vec![0; 63]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::FrameSize {
                expected: 64,
                actual: 63
            }
        ));
        assert!(Frame::new(4, 4, vec![0; 64]).is_ok());
    }

    #[test]
    fn solid_fills_every_pixel() {
        let frame = Frame::solid(3, 2, [1, 2, 3, 255]);
        assert_eq!(frame.pixels().len(), 24);
        assert!(frame.pixels().chunks(4).all(|px| px == [1, 2, 3, 255]));
    }

    #[test]
    fn png_decodes_to_same_dimensions() {
        let frame = Frame::solid(17, 9, [200, 40, 10, 255]);
        for compression in
            [PngCompression::Fast, PngCompression::Default, PngCompression::Best]
        {
            let png = frame.encode_png(compression).unwrap();
            assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
            let decoded = image::load_from_memory_with_format(
                &png,
                image::ImageFormat::Png,
            )
            .unwrap()
            .to_rgba8();
            assert_eq!(decoded.dimensions(), (17, 9));
            assert_eq!(decoded.as_raw(), frame.pixels());
        }
    }

    #[test]
    fn compression_parses_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            c: PngCompression,
        }
        let w: Wrapper = toml::from_str("c = \"best\"").unwrap();
        assert_eq!(w.c, PngCompression::Best);
    }
}
