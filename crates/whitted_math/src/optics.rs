//! Mirror reflection and Snell refraction.

use crate::Vec3;

/// Distance secondary-ray origins are pushed off a surface.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Reflect `incident` about the normal `n`.
#[inline]
pub fn reflect(incident: Vec3, n: Vec3) -> Vec3 {
    incident - n * 2.0 * incident.dot(n)
}

/// Refract `incident` through a surface with outward normal `n` separating
/// vacuum (index 1) from a medium of `refractive_index`.
///
/// The side is taken from the sign of the incidence cosine: a ray travelling
/// along the normal is leaving the medium, so the indices are swapped and the
/// normal flipped. Returns `Vec3::ZERO` on total internal reflection.
pub fn refract(incident: Vec3, n: Vec3, refractive_index: f32) -> Vec3 {
    let mut cos_i = -incident.dot(n).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, refractive_index);
    let mut normal = n;

    if cos_i < 0.0 {
        cos_i = -cos_i;
        std::mem::swap(&mut eta_i, &mut eta_t);
        normal = -n;
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        incident * eta + normal * (eta * cos_i - k.sqrt())
    }
}

/// Push `point` off the surface along `n`, to the side `direction` leaves on.
#[inline]
pub fn offset_origin(point: Vec3, direction: Vec3, n: Vec3) -> Vec3 {
    if direction.dot(n) < 0.0 {
        point - n * SURFACE_EPSILON
    } else {
        point + n * SURFACE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_angle(degrees: f32) -> Vec3 {
        let theta = degrees.to_radians();
        Vec3::new(theta.sin(), -theta.cos(), 0.0)
    }

    #[test]
    fn test_reflect_flat_surface() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(incident, Vec3::Y);
        assert!((reflected - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_double_reflect_is_identity() {
        let incident = Vec3::new(0.3, -0.8, 0.52).normalize();
        let n = Vec3::new(0.1, 1.0, -0.2).normalize();
        let twice = reflect(reflect(incident, n), n);
        assert!((twice - incident).length() < 1e-5);
    }

    #[test]
    fn test_refract_head_on_passes_straight() {
        let refracted = refract(Vec3::NEG_Y, Vec3::Y, 1.5);
        assert!((refracted - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_entering_bends_towards_normal() {
        // Air into glass at 60 degrees: sin(t) = sin(60) / 1.5
        let refracted = refract(at_angle(60.0), Vec3::Y, 1.5);
        assert!(refracted != Vec3::ZERO);
        let sin_t = refracted.normalize().x;
        assert!((sin_t - 60f32.to_radians().sin() / 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection_beyond_critical_angle() {
        // Leaving glass (index 1.5) at 60 degrees, critical angle is ~41.8
        let inside = -at_angle(60.0);
        let refracted = refract(inside, Vec3::Y, 1.5);
        assert_eq!(refracted, Vec3::ZERO);
    }

    #[test]
    fn test_below_critical_angle_still_refracts_on_exit() {
        let inside = -at_angle(30.0);
        let refracted = refract(inside, Vec3::Y, 1.5);
        assert!(refracted != Vec3::ZERO);
        assert!(refracted.y > 0.0);
    }

    #[test]
    fn test_offset_origin_follows_direction_side() {
        let p = Vec3::ZERO;
        assert_eq!(offset_origin(p, Vec3::Y, Vec3::Y), Vec3::new(0.0, SURFACE_EPSILON, 0.0));
        assert_eq!(offset_origin(p, Vec3::NEG_Y, Vec3::Y), Vec3::new(0.0, -SURFACE_EPSILON, 0.0));
    }
}
