//! Glint math - vector kernel for the path tracer.
//!
//! Everything is double precision. `Vec3`, `Point3` and `Color` are all
//! aliases of [`glam::DVec3`]; points and directions share one type.

pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{
    near_zero, random_f64, random_in_unit_disk, random_on_hemisphere, random_range,
    random_unit_vector, random_vec, reflect, refract,
};

/// 3D vector of `f64`.
pub type Vec3 = DVec3;

/// A location in space.
pub type Point3 = DVec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = DVec3;
