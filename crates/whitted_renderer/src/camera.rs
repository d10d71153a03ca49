//! Pinhole camera for primary rays.

use crate::Ray;
use whitted_math::Vec3;

/// A pinhole camera at the origin looking down `-Z` with `+Y` up.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    /// Vertical field of view in degrees
    vfov: f32,
    /// Cached tan(vfov / 2)
    half_height: f32,
    aspect: f32,
}

impl Camera {
    pub fn new(image_width: u32, image_height: u32, vfov: f32) -> Self {
        Self {
            image_width,
            image_height,
            vfov,
            half_height: (vfov.to_radians() / 2.0).tan(),
            aspect: image_width as f32 / image_height as f32,
        }
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    /// Primary ray through the center of pixel (`row`, `col`), row 0 at the top.
    pub fn get_ray(&self, row: u32, col: u32) -> Ray {
        let x = (2.0 * (col as f32 + 0.5) / self.image_width as f32 - 1.0) * self.half_height * self.aspect;
        let y = -(2.0 * (row as f32 + 0.5) / self.image_height as f32 - 1.0) * self.half_height;
        Ray::new(Vec3::ZERO, Vec3::new(x, y, -1.0).normalize())
    }
}
