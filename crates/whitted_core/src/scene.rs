//! Scene descriptions.
//!
//! A `SceneDescription` is the plain-data form of a scene: named materials,
//! ordered primitive lists, lights and the two texture sources. It is what
//! scene files deserialize into and is resolved into renderable geometry by
//! the renderer before any ray is cast.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use whitted_math::{Vec3, Vec4};

use crate::{Color, Light, Material, Texture};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("{kind} #{index}: {reason}")]
    InvalidPrimitive {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("Light #{0} must have positive intensity")]
    InvalidLight(usize),

    #[error("Material '{0}' must have a positive refractive index and non-negative specular exponent")]
    InvalidMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Serialized form of a `Material`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub refractive_index: f32,
    /// `[diffuse, specular, reflective, refractive]`
    pub albedo: [f32; 4],
    pub diffuse_color: [f32; 3],
    pub specular_exponent: f32,
}

impl MaterialDesc {
    pub fn to_material(&self) -> Material {
        Material::new(
            self.refractive_index,
            Vec4::from_array(self.albedo),
            Color::from_array(self.diffuse_color),
            self.specular_exponent,
        )
    }
}

impl From<Material> for MaterialDesc {
    fn from(m: Material) -> Self {
        Self {
            refractive_index: m.refractive_index,
            albedo: m.albedo.to_array(),
            diffuse_color: m.diffuse_color.to_array(),
            specular_exponent: m.specular_exponent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderDesc {
    pub center: [f32; 3],
    pub radius: f32,
    /// Upper cap in world y
    pub height: f32,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscDesc {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareDesc {
    pub center: [f32; 3],
    pub side: f32,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidDesc {
    pub vertices: [[f32; 3]; 4],
    pub material: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    pub position: [f32; 3],
    pub intensity: f32,
}

impl LightDesc {
    pub fn to_light(&self) -> Light {
        Light::new(Vec3::from_array(self.position), self.intensity)
    }
}

/// Where a texture comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSource {
    /// Image file, relative paths resolved against the scene file
    Image(PathBuf),
    /// Flat color
    Color([f32; 3]),
}

impl Default for TextureSource {
    fn default() -> Self {
        TextureSource::Color([0.0, 0.0, 0.0])
    }
}

impl TextureSource {
    /// Resolve into a texture. Unreadable images degrade to black.
    pub fn load(&self, base_dir: Option<&Path>) -> Texture {
        match self {
            TextureSource::Color(c) => Texture::flat(Color::from_array(*c)),
            TextureSource::Image(path) => {
                let full = match base_dir {
                    Some(base) if path.is_relative() => base.join(path),
                    _ => path.clone(),
                };
                Texture::load_or_flat(full, Color::ZERO)
            }
        }
    }
}

/// A complete scene in serializable form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
    pub pyramids: Vec<PyramidDesc>,
    pub cylinders: Vec<CylinderDesc>,
    pub discs: Vec<DiscDesc>,
    pub squares: Vec<SquareDesc>,
    pub liquid_spheres: Vec<SphereDesc>,
    pub lights: Vec<LightDesc>,
    pub background: TextureSource,
    pub liquid_texture: TextureSource,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let description = Self::from_json(&text)?;
        log::debug!(
            "Loaded scene {}: {} primitives, {} lights",
            path.as_ref().display(),
            description.primitive_count(),
            description.lights.len()
        );
        Ok(description)
    }

    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a named material.
    pub fn material(&self, name: &str) -> SceneResult<Material> {
        self.materials
            .get(name)
            .map(MaterialDesc::to_material)
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
    }

    pub fn primitive_count(&self) -> usize {
        self.spheres.len()
            + self.pyramids.len()
            + self.cylinders.len()
            + self.discs.len()
            + self.squares.len()
            + self.liquid_spheres.len()
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        for (name, m) in &self.materials {
            if !(m.refractive_index > 0.0) || !(m.specular_exponent >= 0.0) {
                return Err(SceneError::InvalidMaterial(name.clone()));
            }
        }

        let positive = |kind: &'static str, index: usize, what: &str, value: f32| {
            if value > 0.0 {
                Ok(())
            } else {
                Err(SceneError::InvalidPrimitive {
                    kind,
                    index,
                    reason: format!("{what} must be positive, got {value}"),
                })
            }
        };

        for (i, s) in self.spheres.iter().enumerate() {
            positive("sphere", i, "radius", s.radius)?;
            self.material(&s.material)?;
        }
        for (i, p) in self.pyramids.iter().enumerate() {
            if p.vertices.iter().any(|v| v.iter().any(|c| !c.is_finite())) {
                return Err(SceneError::InvalidPrimitive {
                    kind: "pyramid",
                    index: i,
                    reason: "vertices must be finite".to_string(),
                });
            }
            self.material(&p.material)?;
        }
        for (i, c) in self.cylinders.iter().enumerate() {
            positive("cylinder", i, "radius", c.radius)?;
            self.material(&c.material)?;
        }
        for (i, d) in self.discs.iter().enumerate() {
            positive("disc", i, "radius", d.radius)?;
            self.material(&d.material)?;
        }
        for (i, s) in self.squares.iter().enumerate() {
            positive("square", i, "side", s.side)?;
            self.material(&s.material)?;
        }
        for (i, s) in self.liquid_spheres.iter().enumerate() {
            positive("liquid sphere", i, "radius", s.radius)?;
            self.material(&s.material)?;
        }
        for (i, l) in self.lights.iter().enumerate() {
            if !(l.intensity > 0.0) {
                return Err(SceneError::InvalidLight(i));
            }
        }

        Ok(())
    }

    /// The demo scene: a rubber ball and a mirror ball behind a glass
    /// pyramid, an ebony column and plate, and a small water droplet.
    pub fn showcase() -> Self {
        let material = |ri: f32, albedo: [f32; 4], color: [f32; 3], spec: f32| MaterialDesc {
            refractive_index: ri,
            albedo,
            diffuse_color: color,
            specular_exponent: spec,
        };

        let mut materials = BTreeMap::new();
        materials.insert("ivory".to_string(), material(1.0, [0.6, 0.3, 0.1, 0.0], [0.4, 0.4, 0.3], 50.0));
        materials.insert("ebony".to_string(), material(1.0, [0.6, 0.3, 0.1, 0.0], [0.1, 0.1, 0.1], 50.0));
        materials.insert("glass".to_string(), material(1.5, [0.0, 0.5, 0.1, 0.9], [0.5, 0.6, 0.6], 125.0));
        materials.insert("red_rubber".to_string(), material(1.0, [0.9, 0.1, 0.0, 0.0], [0.3, 0.1, 0.1], 10.0));
        materials.insert("mirror".to_string(), material(1.0, [0.0, 10.0, 0.8, 0.0], [1.0, 1.0, 1.0], 1425.0));
        materials.insert("water".to_string(), material(1.015, [0.3, 0.3, 0.1, 0.78], [0.4, 0.4, 0.5], 50.0));

        let sphere = |center: [f32; 3], radius: f32, material: &str| SphereDesc {
            center,
            radius,
            material: material.to_string(),
        };
        let light = |position: [f32; 3], intensity: f32| LightDesc { position, intensity };

        Self {
            materials,
            spheres: vec![
                sphere([1.5, -0.5, -18.0], 2.0, "red_rubber"),
                sphere([7.0, 5.0, -18.0], 4.0, "mirror"),
            ],
            pyramids: vec![PyramidDesc {
                vertices: [
                    [-2.5, 0.0, -8.0],
                    [0.5, -2.0, -6.0],
                    [1.5, 1.0, -8.0],
                    [-1.5, -2.0, -10.0],
                ],
                material: "glass".to_string(),
            }],
            cylinders: vec![CylinderDesc {
                center: [0.0, 6.0, -8.0],
                radius: 2.0,
                height: -3.0,
                material: "ebony".to_string(),
            }],
            discs: vec![DiscDesc {
                center: [0.0, -3.0, -8.0],
                radius: 2.0,
                material: "ebony".to_string(),
            }],
            squares: Vec::new(),
            liquid_spheres: vec![sphere([-0.25, -0.5, -8.0], 0.5, "water")],
            lights: vec![
                light([-20.0, 20.0, 20.0], 1.5),
                light([30.0, 50.0, -25.0], 1.8),
                light([30.0, 20.0, 30.0], 1.7),
                light([0.0, 30.0, -14.0], 1.7),
            ],
            background: TextureSource::Color([0.2, 0.7, 0.8]),
            liquid_texture: TextureSource::Color([0.1, 0.3, 0.6]),
        }
    }
}
