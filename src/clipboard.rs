//! Image interchange with the system clipboard.
//!
//! The clipboard transport itself lives outside this crate; it hands over
//! encoded image bytes and receives PNG bytes back.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::pixels::PixelBuffer;
use crate::point::{Point, bound_rect};
use crate::serializer::PixelArray;

/// Errors that can occur when moving images across the clipboard boundary
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to decode clipboard image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Pixel data size mismatch: {width}x{height} needs {expected} bytes, got {actual}")]
    SizeMismatch {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },

    #[error("Clipboard image is empty")]
    Empty,

    #[error("Clipboard image is too large: {0}x{1}")]
    TooLarge(u32, u32),
}

/// An RGBA8 image ready to be pasted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PasteDataNode", into = "PasteDataNode")]
pub struct PasteData {
    width: i32,
    height: i32,
    pixel_bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum PasteDataNode {
    PasteData {
        width: i32,
        height: i32,
        #[serde(rename = "pixelBytes")]
        pixel_bytes: PixelArray,
    },
}

impl TryFrom<PasteDataNode> for PasteData {
    type Error = ClipboardError;

    fn try_from(node: PasteDataNode) -> Result<Self, Self::Error> {
        let PasteDataNode::PasteData {
            width,
            height,
            pixel_bytes,
        } = node;
        PasteData::new(width, height, pixel_bytes.0)
    }
}

impl From<PasteData> for PasteDataNode {
    fn from(data: PasteData) -> Self {
        PasteDataNode::PasteData {
            width: data.width,
            height: data.height,
            pixel_bytes: PixelArray(data.pixel_bytes),
        }
    }
}

impl PasteData {
    /// Wrap `pixel_bytes`, which must hold exactly `width * height` RGBA8 pixels.
    pub fn new(width: i32, height: i32, pixel_bytes: Vec<u8>) -> Result<Self, ClipboardError> {
        if width <= 0 || height <= 0 {
            return Err(ClipboardError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if pixel_bytes.len() != expected {
            log::warn!(
                "Paste data size mismatch: expected {} bytes, got {} bytes",
                expected,
                pixel_bytes.len()
            );
            return Err(ClipboardError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixel_bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixel_bytes,
        })
    }

    /// Decode any image format the `image` crate understands.
    pub fn decode(bytes: &[u8]) -> Result<Self, ClipboardError> {
        let decoded = image::load_from_memory(bytes).inspect_err(|e| {
            log::warn!("Failed to decode clipboard image: {}", e);
        })?;
        log::debug!("Decoded clipboard image: {}x{}", decoded.width(), decoded.height());
        Self::from_rgba_image(&decoded.to_rgba8())
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, ClipboardError> {
        let (w, h) = image.dimensions();
        let (Ok(width), Ok(height)) = (i32::try_from(w), i32::try_from(h)) else {
            return Err(ClipboardError::TooLarge(w, h));
        };
        Self::new(width, height, image.as_raw().clone())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn pixel_bytes(&self) -> &[u8] {
        &self.pixel_bytes
    }

    /// Colors of row `y`, empty when out of range.
    pub fn row(&self, y: i32) -> Vec<Color> {
        if y < 0 || y >= self.height {
            return Vec::new();
        }
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        self.pixel_bytes[start..start + stride]
            .chunks_exact(4)
            .map(|px| Color(u32::from_le(bytemuck::pod_read_unaligned(px))))
            .collect()
    }
}

/// Copy the box spanned by `p1` and `p2`, clamped to the buffer, as an image.
pub fn copy_region(pixels: &PixelBuffer, p1: Point, p2: Point) -> RgbaImage {
    if pixels.width() == 0 || pixels.height() == 0 {
        return RgbaImage::new(0, 0);
    }
    let (min, max) = bound_rect(p1, p2, pixels.size());
    let size = max - min + Point::ONE;
    RgbaImage::from_fn(size.x as u32, size.y as u32, |x, y| {
        Rgba(pixels.get(min + Point::new(x as i32, y as i32)).to_rgba())
    })
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ClipboardError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
