//! Four-vertex pyramid made of triangles.
//!
//! Uses the Möller-Trumbore algorithm for each ray-triangle test.

use super::{HitRecord, Hittable};
use crate::Ray;
use whitted_math::Vec3;

/// Vertex indices of the four faces.
const FACES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];

/// Rays this close to parallel with a face miss it.
const DETERMINANT_EPSILON: f32 = 1e-4;

/// Face hits nearer than this are discarded.
const MIN_T: f32 = 1e-3;

/// A tetrahedron given by four vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pyramid {
    pub vertices: [Vec3; 4],
}

impl Pyramid {
    pub fn new(vertices: [Vec3; 4]) -> Self {
        Self { vertices }
    }

    /// Unit normal of face `(a, b, c)`: `(v_c - v_a) x (v_b - v_a)`.
    fn face_normal(&self, (a, b, c): (usize, usize, usize)) -> Vec3 {
        let v = &self.vertices;
        (v[c] - v[a]).cross(v[b] - v[a]).normalize()
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the ray parameter of the hit, or `None` if the ray is parallel to
/// the triangle or passes outside it. The parameter may be negative.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray.direction().cross(edge2);
    let det = edge1.dot(pvec);

    // Ray is parallel to triangle
    if !(det.abs() >= DETERMINANT_EPSILON) {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin() - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction().dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some(edge2.dot(qvec) * inv_det)
}

impl Hittable for Pyramid {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let v = &self.vertices;
        let mut best: Option<(f32, (usize, usize, usize))> = None;

        for face in FACES {
            let Some(t) = intersect_triangle(ray, v[face.0], v[face.1], v[face.2]) else {
                continue;
            };
            if t > MIN_T && t.is_finite() && best.map_or(true, |(nearest, _)| t < nearest) {
                best = Some((t, face));
            }
        }

        best.map(|(t, face)| HitRecord {
            t,
            p: ray.at(t),
            normal: self.face_normal(face),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetra() -> Pyramid {
        Pyramid::new([
            Vec3::new(-2.5, 0.0, -8.0),
            Vec3::new(0.5, -2.0, -6.0),
            Vec3::new(1.5, 1.0, -8.0),
            Vec3::new(-1.5, -2.0, -10.0),
        ])
    }

    fn centroid(p: &Pyramid) -> Vec3 {
        p.vertices.iter().copied().sum::<Vec3>() / 4.0
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
        .unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        let t = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_pyramid_hit_towards_centroid() {
        let pyramid = tetra();
        let ray = Ray::new(Vec3::ZERO, centroid(&pyramid).normalize());
        let rec = pyramid.hit(&ray).unwrap();

        assert!(rec.t > 0.0);
        assert!(rec.t < centroid(&pyramid).length());
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
        assert!((rec.p - ray.at(rec.t)).length() < 1e-6);
    }

    #[test]
    fn test_pyramid_reports_nearest_face() {
        let pyramid = tetra();
        let ray = Ray::new(Vec3::ZERO, centroid(&pyramid).normalize());
        let rec = pyramid.hit(&ray).unwrap();

        let v = pyramid.vertices;
        let all: Vec<f32> = FACES
            .iter()
            .filter_map(|&(a, b, c)| intersect_triangle(&ray, v[a], v[b], v[c]))
            .filter(|&t| t > MIN_T)
            .collect();
        assert_eq!(all.len(), 2);
        assert_eq!(rec.t, all.iter().copied().fold(f32::INFINITY, f32::min));
    }

    #[test]
    fn test_hit_point_lies_in_a_face_plane() {
        let pyramid = tetra();
        let ray = Ray::new(Vec3::ZERO, centroid(&pyramid).normalize());
        let rec = pyramid.hit(&ray).unwrap();

        let on_face = FACES.iter().any(|&face| {
            let n = pyramid.face_normal(face);
            (rec.p - pyramid.vertices[face.0]).dot(n).abs() < 1e-4 && n.dot(rec.normal) > 0.999
        });
        assert!(on_face);
    }

    #[test]
    fn test_pyramid_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(tetra().hit(&ray).is_none());
    }
}
