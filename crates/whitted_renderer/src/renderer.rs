//! Image renderer.
//!
//! Renders in two passes:
//! - one primary ray per pixel, shaded in parallel over rows
//! - a 3x3 splat filter gathered from the interior samples, also per row
//!
//! followed by a hue-preserving clamp to 8-bit RGB.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use image::codecs::jpeg::JpegEncoder;
use rayon::prelude::*;
use whitted_core::Texture;
use whitted_math::Interval;

use crate::scene::{Scene, MAX_DISTANCE};
use crate::shader::cast_ray;
use crate::{Camera, Color};

const JPEG_QUALITY: u8 = 100;

/// Default output edge length in pixels.
pub const DEFAULT_EDGE: u32 = 512;

/// Splat weights indexed by `[row offset + 1][column offset + 1]`.
pub const SPLAT_KERNEL: [[f32; 3]; 3] = [
    [0.05, 0.3, 0.05],
    [0.3, 0.3, 0.3],
    [0.05, 0.3, 0.05],
];

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Deepest bounce that is still shaded; deeper rays see the background
    pub max_depth: u32,
    /// Hits at or beyond this distance are misses
    pub max_distance: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_EDGE,
            height: DEFAULT_EDGE,
            fov_y: 90.0,
            max_depth: 6,
            max_distance: MAX_DISTANCE,
        }
    }
}

impl RenderConfig {
    /// Square output of the given edge length.
    pub fn square(edge: u32) -> Self {
        Self {
            width: edge,
            height: edge,
            ..Default::default()
        }
    }
}

/// Everything a render reads: built once, shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub scene: Scene,
    /// Environment seen on misses
    pub background: Texture,
    pub config: RenderConfig,
}

impl RenderContext {
    pub fn new(scene: Scene, background: Texture, config: RenderConfig) -> Self {
        let scene = scene.with_max_distance(config.max_distance);
        Self {
            scene,
            background,
            config,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.config.width, self.config.height, self.config.fov_y)
    }
}

/// Hue-preserving clamp: scale down so the largest channel is at most 1,
/// then clamp to [0, 1] and quantize.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let max = color.max_element();
    let color = if max > 1.0 { color / max } else { color };
    let quantize = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        let idx = self.index(row, col);
        self.pixels[idx] = color;
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// True if (row, col) lies on the outermost ring of pixels.
    pub fn is_border(&self, row: u32, col: u32) -> bool {
        row == 0 || col == 0 || row + 1 >= self.height || col + 1 >= self.width
    }

    /// Tone-mapped RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&c| color_to_rgb(c)).collect()
    }

    /// Encode to an image file; the format follows the extension.
    ///
    /// JPEG output is written at quality 100.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let path = path.as_ref();
        let rgb = self.to_rgb8();

        if is_jpeg(path) {
            let writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).encode(
                &rgb,
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )
        } else {
            image::save_buffer(path, &rgb, self.width, self.height, image::ColorType::Rgb8)
        }
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Shade a single pixel.
pub fn render_pixel(ctx: &RenderContext, camera: &Camera, row: u32, col: u32) -> Color {
    cast_ray(ctx, &camera.get_ray(row, col), 0)
}

/// Shade one sample per pixel, in parallel over rows.
pub fn render_samples(ctx: &RenderContext) -> ImageBuffer {
    let camera = ctx.camera();
    let mut samples = ImageBuffer::new(ctx.config.width, ctx.config.height);
    let width = samples.width as usize;
    if width == 0 {
        return samples;
    }

    samples
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, line)| {
            for (col, pixel) in line.iter_mut().enumerate() {
                *pixel = render_pixel(ctx, &camera, row as u32, col as u32);
            }
        });

    samples
}

/// Spread every interior sample over its 3x3 neighborhood with
/// `SPLAT_KERNEL`, written as a gather so rows are independent.
///
/// Border samples are not splatted and border pixels stay black.
pub fn splat(samples: &ImageBuffer) -> ImageBuffer {
    let mut out = ImageBuffer::new(samples.width, samples.height);
    let width = out.width as usize;
    if width == 0 {
        return out;
    }

    out.pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, line)| {
            let row = row as u32;
            for (col, pixel) in line.iter_mut().enumerate() {
                let col = col as u32;
                if samples.is_border(row, col) {
                    continue;
                }

                let mut sum = Color::ZERO;
                for (dr, weights) in SPLAT_KERNEL.iter().enumerate() {
                    for (dc, &weight) in weights.iter().enumerate() {
                        // Interior pixels have all eight neighbors
                        let (r, c) = (row + dr as u32 - 1, col + dc as u32 - 1);
                        if !samples.is_border(r, c) {
                            sum += samples.get(r, c) * weight;
                        }
                    }
                }
                *pixel = sum;
            }
        });

    out
}

/// Render the entire scene to a filtered image buffer.
pub fn render(ctx: &RenderContext) -> ImageBuffer {
    log::info!(
        "Rendering {}x{} ({} primitives, {} lights)",
        ctx.config.width,
        ctx.config.height,
        ctx.scene.primitives().len(),
        ctx.scene.lights().len()
    );

    let start = Instant::now();
    let samples = render_samples(ctx);
    log::debug!("Shaded {} samples in {:?}", samples.pixels.len(), start.elapsed());

    let image = splat(&samples);
    log::info!("Rendered in {:?}", start.elapsed());
    image
}
