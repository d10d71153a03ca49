//! Sphere primitive.

use super::{valid_distance, HitRecord, Hittable};
use crate::Ray;
use whitted_math::Vec3;

/// A sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Solve `|O + tD - C|^2 = r^2` for the nearest non-negative root.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first; from inside the sphere only the far one is ahead
        valid_distance((h - sqrtd) / a, 0.0).or_else(|| valid_distance((h + sqrtd) / a, 0.0))
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect(ray)?;
        let p = ray.at(t);
        Some(HitRecord {
            t,
            p,
            normal: (p - self.center).normalize(),
        })
    }
}
