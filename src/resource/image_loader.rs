//! Decoded RGBA8 images and the decoder seam.

use super::{extension_lowercase, ResourceCache};
use crate::error::{Error, Result};
use crate::math::Rgba8;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// A decoded image, rows bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Image {
    /// Create an image from its pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::InvalidLayout(format!(
                "{}x{} image needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// An image with no pixels. `valid()` is false.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// A single white pixel.
    pub fn fallback() -> &'static Image {
        static FALLBACK: OnceLock<Image> = OnceLock::new();
        FALLBACK.get_or_init(|| Image {
            width: 1,
            height: 1,
            pixels: vec![Rgba8::WHITE],
        })
    }

    /// True when the image has pixels.
    pub fn valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.width as usize * self.height as usize
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels, row by row.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixels as tightly packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// This image, or the fallback when it is invalid.
    pub fn texture_source(&self) -> &Image {
        if self.valid() {
            self
        } else {
            Self::fallback()
        }
    }
}

/// Turns encoded bytes into an [`Image`].
pub trait ImageDecoder: Send + Sync {
    /// True when this decoder handles the lowercase file extension.
    fn supports(&self, extension: &str) -> bool;

    /// Decode `bytes`. The error is a human readable reason.
    fn decode(&self, bytes: &[u8]) -> std::result::Result<Image, String>;
}

/// Decoder for every format the `image` crate reads (PNG, JPEG, PNM, BMP, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecDecoder;

impl ImageDecoder for CodecDecoder {
    fn supports(&self, extension: &str) -> bool {
        image::ImageFormat::from_extension(extension).is_some()
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<Image, String> {
        let decoded = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
        let mut rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(format!("empty {}x{} image", width, height));
        }

        // decoders yield rows top to bottom
        image::imageops::flip_vertical_in_place(&mut rgba);
        let pixels = rgba.pixels().map(|p| Rgba8::new(p[0], p[1], p[2], p[3])).collect();
        Image::new(width, height, pixels).map_err(|e| e.to_string())
    }
}

/// Process-wide decoded image cache.
pub fn image_cache() -> &'static ResourceCache<Image> {
    static IMAGES: ResourceCache<Image> = ResourceCache::new();
    &IMAGES
}

/// Read and decode an image through the shared cache.
pub fn load_image(path: impl AsRef<Path>, decoders: &[&dyn ImageDecoder]) -> Result<Arc<Image>> {
    image_cache().load(path, |path| {
        let bytes = std::fs::read(path).map_err(|_| Error::ResourceMissing(path.to_path_buf()))?;
        let extension = extension_lowercase(path).unwrap_or_default();
        let decoder = decoders.iter().find(|d| d.supports(&extension)).ok_or_else(|| Error::DecodeFailed {
            path: path.to_path_buf(),
            reason: format!("no decoder for '{}'", extension),
        })?;
        decoder.decode(&bytes).map_err(|reason| Error::DecodeFailed {
            path: path.to_path_buf(),
            reason,
        })
    })
}

/// Like [`load_image`], but warns and returns an invalid image on failure.
pub fn load_image_or_invalid(path: impl AsRef<Path>, decoders: &[&dyn ImageDecoder]) -> Arc<Image> {
    load_image(path, decoders).unwrap_or_else(|e| {
        log::warn!("{}", e);
        Arc::new(Image::invalid())
    })
}
