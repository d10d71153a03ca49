//! Recursive shading.
//!
//! `cast_ray` returns the color seen along a ray: the environment on a miss,
//! otherwise Phong-style local lighting with hard shadows blended with
//! recursively traced reflection and refraction.

use crate::scene::{Scene, SceneHit};
use crate::{Color, Ray, RenderContext};
use whitted_core::Material;
use whitted_math::{offset_origin, reflect, refract, Vec3};

/// Accumulated light arriving at a surface point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lighting {
    pub diffuse: f32,
    pub specular: f32,
}

/// Compute the color seen by a ray.
///
/// Rays past `max_depth` bounces return the background like a miss.
pub fn cast_ray(ctx: &RenderContext, ray: &Ray, depth: u32) -> Color {
    let hit = if depth > ctx.config.max_depth {
        None
    } else {
        ctx.scene.intersect(ray)
    };

    let Some(SceneHit {
        point,
        normal,
        material,
        ..
    }) = hit
    else {
        return ctx.background.sample_direction(ray.direction());
    };

    let dir = ray.direction();

    // Branches with zero weight cannot change the result
    let reflect_color = if material.reflective_weight() != 0.0 {
        let reflect_dir = reflect(dir, normal).normalize();
        let origin = offset_origin(point, reflect_dir, normal);
        cast_ray(ctx, &Ray::new(origin, reflect_dir), depth + 1)
    } else {
        Color::ZERO
    };

    // Total internal reflection leaves a zero direction and no contribution
    let refracted = refract(dir, normal, material.refractive_index);
    let refract_color = if material.refractive_weight() != 0.0 && refracted != Vec3::ZERO {
        let refract_dir = refracted.normalize();
        let origin = offset_origin(point, refract_dir, normal);
        cast_ray(ctx, &Ray::new(origin, refract_dir), depth + 1)
    } else {
        Color::ZERO
    };

    let lighting = direct_lighting(&ctx.scene, point, normal, dir, &material);

    material.diffuse_color * lighting.diffuse * material.diffuse_weight()
        + Color::ONE * lighting.specular * material.specular_weight()
        + reflect_color * material.reflective_weight()
        + refract_color * material.refractive_weight()
}

/// Sum the diffuse and specular intensity of every light visible from `point`.
///
/// A light is occluded when anything lies strictly closer along the shadow
/// ray than the light itself.
pub fn direct_lighting(scene: &Scene, point: Vec3, normal: Vec3, view_dir: Vec3, material: &Material) -> Lighting {
    let mut lighting = Lighting::default();

    for light in scene.lights() {
        let to_light = light.position - point;
        let light_distance = to_light.length();
        let Some(light_dir) = to_light.try_normalize() else {
            continue;
        };

        let shadow_ray = Ray::new(offset_origin(point, light_dir, normal), light_dir);
        if let Some(blocker) = scene.intersect(&shadow_ray) {
            if blocker.t < light_distance {
                continue;
            }
        }

        lighting.diffuse += light.intensity * light_dir.dot(normal).max(0.0);
        lighting.specular += (-reflect(-light_dir, normal))
            .dot(view_dir)
            .max(0.0)
            .powf(material.specular_exponent)
            * light.intensity;
    }

    lighting
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use crate::RenderConfig;
    use whitted_core::{Light, Texture};
    use whitted_math::Vec4;

    const BACKGROUND: Color = Color::new(0.2, 0.7, 0.8);

    fn context(primitives: Vec<Primitive>, lights: Vec<Light>) -> RenderContext {
        RenderContext::new(
            Scene::new(primitives, lights, Texture::default()),
            Texture::flat(BACKGROUND),
            RenderConfig::default(),
        )
    }

    fn matte() -> Material {
        Material::diffuse(Color::new(0.4, 0.4, 0.3))
    }

    #[test]
    fn test_miss_returns_background() {
        let ctx = context(Vec::new(), vec![Light::new(Vec3::Z, 1.0)]);
        assert_eq!(cast_ray(&ctx, &Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0), BACKGROUND);
    }

    #[test]
    fn test_depth_exhaustion_returns_background() {
        let sphere = Primitive::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, matte());
        let ctx = context(vec![sphere], vec![Light::new(Vec3::new(0.0, 0.0, 10.0), 1.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_ne!(cast_ray(&ctx, &ray, 6), BACKGROUND);
        assert_eq!(cast_ray(&ctx, &ray, 7), BACKGROUND);
    }

    #[test]
    fn test_front_lit_sphere_is_diffuse_color_times_intensity() {
        let sphere = Primitive::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, matte());
        let ctx = context(vec![sphere], vec![Light::new(Vec3::new(0.0, 0.0, 10.0), 1.5)]);
        let color = cast_ray(&ctx, &Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0);
        assert!((color - matte().diffuse_color * 1.5).length() < 1e-5);
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let floor = Primitive::disc(Vec3::new(0.0, -1.0, -5.0), 3.0, matte());
        let blocker = Primitive::sphere(Vec3::new(0.0, 2.0, -5.0), 1.0, matte());
        let light = Light::new(Vec3::new(0.0, 10.0, -5.0), 2.0);
        let scene = Scene::new(vec![floor, blocker], vec![light], Texture::default());

        let point = Vec3::new(0.0, -1.0, -5.0);
        let lighting = direct_lighting(&scene, point, Vec3::Y, Vec3::NEG_Z, &matte());
        assert_eq!(lighting, Lighting::default());
    }

    #[test]
    fn test_blocker_beyond_light_does_not_shadow() {
        let floor = Primitive::disc(Vec3::new(0.0, -1.0, -5.0), 3.0, matte());
        let above = Primitive::sphere(Vec3::new(0.0, 20.0, -5.0), 1.0, matte());
        let light = Light::new(Vec3::new(0.0, 10.0, -5.0), 2.0);
        let scene = Scene::new(vec![floor, above], vec![light], Texture::default());

        let lighting = direct_lighting(&scene, Vec3::new(0.0, -1.0, -5.0), Vec3::Y, Vec3::NEG_Z, &matte());
        assert!((lighting.diffuse - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_light_behind_surface_adds_no_diffuse() {
        let scene = Scene::new(Vec::new(), vec![Light::new(Vec3::new(0.0, -10.0, 0.0), 1.0)], Texture::default());
        let lighting = direct_lighting(&scene, Vec3::ZERO, Vec3::Y, Vec3::NEG_Y, &matte());
        assert_eq!(lighting.diffuse, 0.0);
    }

    #[test]
    fn test_specular_peaks_on_mirror_direction() {
        let shiny = Material::new(1.0, Vec4::new(0.0, 1.0, 0.0, 0.0), Color::ZERO, 50.0);
        let scene = Scene::new(Vec::new(), vec![Light::new(Vec3::new(0.0, 5.0, 5.0), 1.0)], Texture::default());
        let toward_mirror = Vec3::new(0.0, -1.0, 1.0).normalize();
        let off_axis = Vec3::new(0.5, -1.0, 1.0).normalize();

        let peak = direct_lighting(&scene, Vec3::ZERO, Vec3::Y, toward_mirror, &shiny);
        let dim = direct_lighting(&scene, Vec3::ZERO, Vec3::Y, off_axis, &shiny);
        assert!((peak.specular - 1.0).abs() < 1e-4);
        assert!(dim.specular < peak.specular);
    }

    #[test]
    fn test_mirror_reflects_background() {
        let mirror = Material::new(1.0, Vec4::new(0.0, 0.0, 1.0, 0.0), Color::ZERO, 0.0);
        let ctx = context(vec![Primitive::square(Vec3::new(0.0, 0.0, -3.0), 4.0, mirror)], Vec::new());
        let color = cast_ray(&ctx, &Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0);
        assert!((color - BACKGROUND).length() < 1e-5);
    }

    #[test]
    fn test_clear_glass_passes_background_through() {
        let clear = Material::new(1.5, Vec4::new(0.0, 0.0, 0.0, 1.0), Color::ZERO, 0.0);
        let ctx = context(vec![Primitive::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, clear)], Vec::new());
        let color = cast_ray(&ctx, &Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0);
        assert!((color - BACKGROUND).length() < 1e-4);
    }

    #[test]
    fn test_total_internal_reflection_drops_refraction() {
        // Seen from inside a glass sphere at a steep angle, refraction vanishes
        let glass = Material::new(1.5, Vec4::new(0.0, 0.0, 0.0, 1.0), Color::ZERO, 0.0);
        let ctx = context(vec![Primitive::sphere(Vec3::ZERO, 1.0, glass)], Vec::new());
        let origin = Vec3::new(0.0, -0.9, 0.0);
        let ray = Ray::new(origin, Vec3::X);
        let color = cast_ray(&ctx, &ray, 0);
        assert_eq!(color, Color::ZERO);
    }
}
