//! Glint renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over a list of analytic surfaces:
//!
//! - [`Hittable`] surfaces ([`Sphere`], [`HittableList`])
//! - [`Material`] scattering models ([`Lambertian`], [`Metal`], [`Dielectric`])
//! - a thin-lens [`Camera`] driving the per-pixel sampling loop
//! - PPM and PNG output of the finished [`ImageBuffer`]

mod camera;
mod error;
mod hittable;
mod image_buffer;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{ConfigError, OutputError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use image_buffer::{color_to_rgb8, linear_to_gamma, write_ppm, ImageBuffer};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{ray_color, render, render_pixel, sky_gradient, T_MIN};
pub use sphere::Sphere;

/// Re-export the math types the renderer API is built on
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
