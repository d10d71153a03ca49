//! Whitted Renderer - recursive CPU ray tracing.
//!
//! Casts one primary ray per pixel from a pinhole camera, resolves the
//! nearest hit over spheres, pyramids, cylinders, discs, squares and liquid
//! spheres, and shades it with diffuse and specular lighting, hard shadows
//! and recursive reflection and refraction. The samples are then splatted
//! over a 3x3 neighborhood and clamped to 8-bit RGB.

mod camera;
pub mod primitive;
mod renderer;
mod scene;
mod shader;

pub use camera::Camera;
pub use primitive::{Cylinder, Disc, HitRecord, Hittable, Primitive, Pyramid, Shape, Sphere, Square};
pub use renderer::{
    color_to_rgb, render, render_pixel, render_samples, splat, ImageBuffer, RenderConfig, RenderContext,
    DEFAULT_EDGE, SPLAT_KERNEL,
};
pub use scene::{Scene, SceneHit, MAX_DISTANCE};
pub use shader::{cast_ray, direct_lighting, Lighting};

/// Re-export common types from the lower crates
pub use whitted_core::{Color, Light, Material, Texture};
pub use whitted_math::{Ray, Vec3, Vec4};
