// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{offset_origin, reflect, refract, SURFACE_EPSILON};
pub use ray::Ray;
