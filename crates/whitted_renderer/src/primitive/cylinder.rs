//! Vertical cylinder primitive, capped in world y.

use super::{valid_distance, HitRecord, Hittable};
use crate::Ray;
use whitted_math::{Interval, Vec3};

/// World y below which a cylinder wall is never hit.
pub const CYLINDER_FLOOR: f32 = -100.0;

/// Minimum accepted root.
const MIN_T: f32 = 1e-6;

/// An open cylinder around a vertical axis through `center`.
///
/// The wall spans world y from `CYLINDER_FLOOR` up to `height`; `height` is an
/// absolute y coordinate, not an extent above `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Cylinder {
    pub fn new(center: Vec3, radius: f32, height: f32) -> Self {
        Self {
            center,
            radius,
            height,
        }
    }

    fn span(&self) -> Interval {
        Interval::new(CYLINDER_FLOOR, self.height)
    }

    /// Solve the circle equation in (x, z), then keep the nearest root whose
    /// hit point lies within the y span.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let d = ray.direction();
        let m = ray.origin() - self.center;

        let a = d.x * d.x + d.z * d.z;
        let b = 2.0 * (m.x * d.x + m.z * d.z);
        let c = m.x * m.x + m.z * m.z - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let span = self.span();
        let accept = |t: f32| valid_distance(t, MIN_T).filter(|&t| span.contains(ray.at(t).y));

        accept((-b - sqrtd) / (2.0 * a)).or_else(|| accept((-b + sqrtd) / (2.0 * a)))
    }
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect(ray)?;
        let p = ray.at(t);
        // Radial about the world y axis, not this cylinder's own axis
        let normal = Vec3::new(p.x, 0.0, p.z).normalize();
        Some(HitRecord { t, p, normal })
    }
}
