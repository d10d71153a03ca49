//! Scene-intersection resolver.
//!
//! Finds the nearest primitive hit along a ray across every shape kind.
//! Primitives are kept in a fixed kind order (spheres, pyramids, cylinders,
//! discs, squares, liquid spheres) and compared with a strict `<`, so on an
//! exact distance tie the primitive scanned first wins.

use crate::primitive::{Hittable, Primitive};
use crate::Ray;
use whitted_core::{Light, Material, SceneDescription, SceneResult, Texture};
use whitted_math::Vec3;

/// Hits at or beyond this distance count as misses.
pub const MAX_DISTANCE: f32 = 1000.0;

/// The resolved nearest hit of a ray against the whole scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Distance along the ray
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Material at the hit, with texture color already applied
    pub material: Material,
}

/// Geometry, lights and the liquid-surface texture.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    liquid_texture: Texture,
    max_distance: f32,
}

impl Scene {
    /// Create a scene. Primitives are reordered (stably) into scan order.
    pub fn new(mut primitives: Vec<Primitive>, lights: Vec<Light>, liquid_texture: Texture) -> Self {
        primitives.sort_by_key(|p| p.shape.scan_rank());
        Self {
            primitives,
            lights,
            liquid_texture,
            max_distance: MAX_DISTANCE,
        }
    }

    /// Override the maximum hit distance.
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Resolve a scene description, loading the liquid texture from
    /// `base_dir`-relative paths.
    pub fn from_description(
        description: &SceneDescription,
        base_dir: Option<&std::path::Path>,
    ) -> SceneResult<Self> {
        description.validate()?;

        let v = Vec3::from_array;
        let mut primitives = Vec::with_capacity(description.primitive_count());

        for s in &description.spheres {
            primitives.push(Primitive::sphere(v(s.center), s.radius, description.material(&s.material)?));
        }
        for p in &description.pyramids {
            primitives.push(Primitive::pyramid(p.vertices.map(v), description.material(&p.material)?));
        }
        for c in &description.cylinders {
            primitives.push(Primitive::cylinder(
                v(c.center),
                c.radius,
                c.height,
                description.material(&c.material)?,
            ));
        }
        for d in &description.discs {
            primitives.push(Primitive::disc(v(d.center), d.radius, description.material(&d.material)?));
        }
        for s in &description.squares {
            primitives.push(Primitive::square(v(s.center), s.side, description.material(&s.material)?));
        }
        for s in &description.liquid_spheres {
            primitives.push(Primitive::liquid_sphere(
                v(s.center),
                s.radius,
                description.material(&s.material)?,
            ));
        }

        let lights = description.lights.iter().map(|l| l.to_light()).collect();
        let liquid_texture = description.liquid_texture.load(base_dir);

        log::debug!(
            "Built scene: {} primitives, {} lights",
            primitives.len(),
            description.lights.len()
        );

        Ok(Self::new(primitives, lights, liquid_texture))
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn liquid_texture(&self) -> &Texture {
        &self.liquid_texture
    }

    /// Find the nearest hit along `ray` (normalized direction).
    ///
    /// A liquid surface keeps its own optics but takes its color from the
    /// liquid texture, looked up by the ray direction.
    pub fn intersect(&self, ray: &Ray) -> Option<SceneHit> {
        let mut nearest = f32::INFINITY;
        let mut closest = None;

        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray) {
                if rec.t < nearest {
                    nearest = rec.t;
                    closest = Some((rec, primitive));
                }
            }
        }

        let (rec, primitive) = closest?;
        if rec.t >= self.max_distance {
            return None;
        }

        let material = if primitive.shape.is_liquid() {
            primitive
                .material
                .with_diffuse_color(self.liquid_texture.sample_direction(ray.direction()))
        } else {
            primitive.material
        };

        Some(SceneHit {
            t: rec.t,
            point: rec.p,
            normal: rec.normal,
            material,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Texture::default())
    }
}
