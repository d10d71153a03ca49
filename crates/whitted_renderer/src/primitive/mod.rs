//! Primitive intersection modules.
//!
//! Every shape answers the same question: where along a normalized ray does
//! it first get hit, and what is its normal there. `Primitive` pairs a shape
//! with its material and is the unit the scene resolver scans.

mod cylinder;
mod disc;
mod pyramid;
mod sphere;
mod square;

pub use cylinder::Cylinder;
pub use disc::Disc;
pub use pyramid::Pyramid;
pub use sphere::Sphere;
pub use square::Square;

use crate::Ray;
use whitted_core::Material;
use whitted_math::Vec3;

/// Where a ray meets a single shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Distance along the ray
    pub t: f32,
    /// World-space hit point
    pub p: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
}

/// Trait for shapes that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest valid hit of `ray` (normalized direction) on this shape alone.
    ///
    /// Implementations never report a negative or non-finite distance.
    fn hit(&self, ray: &Ray) -> Option<HitRecord>;
}

/// The closed set of shapes a scene can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Pyramid(Pyramid),
    Cylinder(Cylinder),
    Disc(Disc),
    Square(Square),
    /// A sphere drawn as a liquid surface: fixed `+Z` normal, color taken
    /// from the liquid texture.
    LiquidSphere(Sphere),
}

impl Shape {
    /// Position of this kind in the resolver's scan order.
    pub fn scan_rank(&self) -> u8 {
        match self {
            Shape::Sphere(_) => 0,
            Shape::Pyramid(_) => 1,
            Shape::Cylinder(_) => 2,
            Shape::Disc(_) => 3,
            Shape::Square(_) => 4,
            Shape::LiquidSphere(_) => 5,
        }
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self, Shape::LiquidSphere(_))
    }
}

impl Hittable for Shape {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        match self {
            Shape::Sphere(s) => s.hit(ray),
            Shape::Pyramid(p) => p.hit(ray),
            Shape::Cylinder(c) => c.hit(ray),
            Shape::Disc(d) => d.hit(ray),
            Shape::Square(s) => s.hit(ray),
            Shape::LiquidSphere(s) => s.hit(ray).map(|rec| HitRecord {
                normal: Vec3::Z,
                ..rec
            }),
        }
    }
}

/// A shape with its material.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(center: Vec3, radius: f32, material: Material) -> Self {
        Self::new(Shape::Sphere(Sphere::new(center, radius)), material)
    }

    pub fn liquid_sphere(center: Vec3, radius: f32, material: Material) -> Self {
        Self::new(Shape::LiquidSphere(Sphere::new(center, radius)), material)
    }

    pub fn cylinder(center: Vec3, radius: f32, height: f32, material: Material) -> Self {
        Self::new(Shape::Cylinder(Cylinder::new(center, radius, height)), material)
    }

    pub fn disc(center: Vec3, radius: f32, material: Material) -> Self {
        Self::new(Shape::Disc(Disc::new(center, radius)), material)
    }

    pub fn square(center: Vec3, side: f32, material: Material) -> Self {
        Self::new(Shape::Square(Square::new(center, side)), material)
    }

    pub fn pyramid(vertices: [Vec3; 4], material: Material) -> Self {
        Self::new(Shape::Pyramid(Pyramid::new(vertices)), material)
    }
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        self.shape.hit(ray)
    }
}

/// Accept a root only if it is a usable distance.
#[inline]
pub(crate) fn valid_distance(t: f32, min: f32) -> Option<f32> {
    (t.is_finite() && t >= min).then_some(t)
}
