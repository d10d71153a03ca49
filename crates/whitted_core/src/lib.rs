//! Whitted Core - scene data for the ray tracer.
//!
//! This crate provides:
//!
//! - **Optical types**: `Material`, `Light`, `Color`
//! - **Textures**: decoded images and flat backgrounds, sampled by direction
//! - **Scene descriptions**: the serde form of a scene, loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::{SceneDescription, Texture};
//!
//! let description = SceneDescription::from_path("scene.json")?;
//! description.validate()?;
//! let background = Texture::load("sky.jpg")?;
//! ```

pub mod material;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use material::{Color, Light, Material};
pub use scene::{
    CylinderDesc, DiscDesc, LightDesc, MaterialDesc, PyramidDesc, SceneDescription, SceneError,
    SceneResult, SphereDesc, SquareDesc, TextureSource,
};
pub use texture::{Texture, TextureError, TextureResult};
