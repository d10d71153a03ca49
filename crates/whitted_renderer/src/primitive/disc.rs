//! Horizontal disc primitive.

use super::{valid_distance, HitRecord, Hittable};
use crate::Ray;
use whitted_math::Vec3;

/// Rays flatter than this against the disc plane are ignored.
const GRAZING_LIMIT: f32 = 1e-3;

/// A disc lying in the plane `y = center.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec3,
    pub radius: f32,
}

impl Disc {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let d = ray.direction();
        if !(d.y.abs() > GRAZING_LIMIT) {
            return None;
        }

        let t = -(ray.origin().y - self.center.y) / d.y;
        let p = ray.at(t);
        let dx = p.x - self.center.x;
        let dz = p.z - self.center.z;

        valid_distance(t, 0.0)
            .filter(|&t| t > 0.0 && dx * dx + dz * dz <= self.radius * self.radius)
    }
}

impl Hittable for Disc {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect(ray)?;
        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: Vec3::Y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> Disc {
        Disc::new(Vec3::new(0.0, -3.0, -8.0), 2.0)
    }

    #[test]
    fn test_disc_hit_from_above() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, -8.0), Vec3::NEG_Y);
        let rec = plate().hit(&ray).unwrap();
        assert!((rec.t - 3.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Y);
        assert!((rec.p.y - -3.0).abs() < 1e-6);
    }

    #[test]
    fn test_disc_hit_point_within_radius() {
        let disc = plate();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, -0.4, -1.0).normalize());
        let rec = disc.hit(&ray).unwrap();
        assert!(rec.t > 0.0);
        assert!((rec.p.y - disc.center.y).abs() < 1e-5);
        assert!((rec.p - disc.center).length() <= disc.radius + 1e-5);
    }

    #[test]
    fn test_disc_outside_radius_misses() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, -8.0), Vec3::NEG_Y);
        assert!(plate().intersect(&ray).is_none());
    }

    #[test]
    fn test_disc_behind_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -8.0), Vec3::Y);
        assert!(plate().intersect(&ray).is_none());
    }

    #[test]
    fn test_grazing_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, -3.0005, 0.0), Vec3::new(0.0, 0.0005, -1.0).normalize());
        assert!(plate().intersect(&ray).is_none());
    }
}
