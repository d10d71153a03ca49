//! Optical properties of surfaces and point lights.

use whitted_math::{Vec3, Vec4};

/// Color type alias (RGB, nominally 0-1 but unclamped until output).
pub type Color = Vec3;

/// Surface material for local illumination plus reflection and refraction.
///
/// `albedo` holds the blend weights `[diffuse, specular, reflective,
/// refractive]`; they need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Index of refraction of the medium behind the surface
    pub refractive_index: f32,
    /// Blend weights
    pub albedo: Vec4,
    /// Base color; overwritten by texture lookups on liquid surfaces
    pub diffuse_color: Color,
    /// Phong exponent of the specular highlight
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refractive_index: 1.0,
            albedo: Vec4::new(1.0, 0.0, 0.0, 0.0),
            diffuse_color: Color::ZERO,
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(refractive_index: f32, albedo: Vec4, diffuse_color: Color, specular_exponent: f32) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse_color,
            specular_exponent,
        }
    }

    /// Purely diffuse material of the given color.
    pub fn diffuse(diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    /// Same optical properties, different visible color.
    pub fn with_diffuse_color(mut self, diffuse_color: Color) -> Self {
        self.diffuse_color = diffuse_color;
        self
    }

    #[inline]
    pub fn diffuse_weight(&self) -> f32 {
        self.albedo[0]
    }

    #[inline]
    pub fn specular_weight(&self) -> f32 {
        self.albedo[1]
    }

    #[inline]
    pub fn reflective_weight(&self) -> f32 {
        self.albedo[2]
    }

    #[inline]
    pub fn refractive_weight(&self) -> f32 {
        self.albedo[3]
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self { position, intensity }
    }
}
