//! Textures sampled by direction.
//!
//! A texture is either a decoded image or a flat background color. The same
//! lookup serves environment misses and liquid-surface coloring.

use std::f32::consts::PI;
use std::path::Path;

use thiserror::Error;
use whitted_math::Vec3;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Image {0} has no pixels")]
    Empty(String),

    #[error("Expected {expected} bytes of RGB data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A width x height grid of colors, or a flat background when the grid is empty.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Row-major colors in [0, 1], top row first
    pub pixels: Vec<Color>,

    /// Returned for every lookup when `pixels` is empty
    pub background: Color,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from row-major pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            background: Color::ZERO,
            path: path.into(),
        }
    }

    /// A texture with no image that answers every lookup with `background`.
    pub fn flat(background: Color) -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            background,
            path: "<flat>".to_string(),
        }
    }

    /// Build a texture from packed 8-bit RGB triples.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8], path: impl Into<String>) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|p| Color::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        Ok(Self::new(width, height, pixels, path))
    }

    /// Decode an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.display().to_string()));
        }

        let texture = Self::from_rgb8(width, height, rgb.as_raw(), path.to_string_lossy())?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            texture.path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Decode an image file, falling back to a flat color if it cannot be read.
    pub fn load_or_flat(path: impl AsRef<Path>, fallback: Color) -> Self {
        match Self::load(path.as_ref()) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!(
                    "Could not load texture {}: {}; using flat background",
                    path.as_ref().display(),
                    e
                );
                Self::flat(fallback)
            }
        }
    }

    /// True if this texture has no image data.
    pub fn is_flat(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Look up the color seen in `direction` (expected normalized).
    ///
    /// Longitude `atan2(z, x)` maps across the width and latitude `asin(y)`
    /// down the height, so straight up is the top row. Indices are clamped
    /// to the grid.
    pub fn sample_direction(&self, direction: Vec3) -> Color {
        if self.is_flat() {
            return self.background;
        }

        let u = 0.5 + direction.z.atan2(direction.x) / (2.0 * PI);
        let v = 0.5 - direction.y.clamp(-1.0, 1.0).asin() / PI;

        // NaN casts to 0
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1);
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1);

        self.get_pixel(x as u32, y as u32)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(self.background)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::flat(Color::ZERO)
    }
}
