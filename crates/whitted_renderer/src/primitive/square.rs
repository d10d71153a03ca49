//! Vertical square primitive.

use super::{valid_distance, HitRecord, Hittable};
use crate::Ray;
use whitted_math::Vec3;

/// An axis-aligned square lying in the plane `z = center.z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub center: Vec3,
    pub side: f32,
}

impl Square {
    pub fn new(center: Vec3, side: f32) -> Self {
        Self { center, side }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let d = ray.direction();
        // A ray parallel to the plane never meets it
        if d.z == 0.0 {
            return None;
        }

        let t = -(ray.origin().z - self.center.z) / d.z;
        let p = ray.at(t);
        let half = self.side / 2.0;

        valid_distance(t, 0.0).filter(|&t| {
            t > 0.0 && (p.x - self.center.x).abs() < half && (p.y - self.center.y).abs() < half
        })
    }
}

impl Hittable for Square {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect(ray)?;
        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: Vec3::Z,
        })
    }
}
