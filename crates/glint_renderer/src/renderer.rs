//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative path tracing bounded by a bounce budget
//! - Sky gradient environment lighting
//! - Anti-aliasing via multi-sampling

use crate::{Camera, Hittable, ImageBuffer};
use glint_math::{Color, Interval, Ray};
use rand::RngCore;
use std::time::Instant;

/// Lower bound on accepted hit distances. Keeps scattered rays from
/// re-hitting the surface they start on due to floating-point error.
pub const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It follows the ray through
/// the scene for at most `depth` bounces, multiplying the attenuation of
/// every surface it scatters off. Runs in constant stack space.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Ray was absorbed
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted, no light gathered
    Color::ZERO
}

/// Background seen by rays that escape the scene: white at the horizon
/// blending to sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Render the entire scene to an image buffer.
///
/// Scans rows top to bottom and pixels left to right on the calling thread.
/// Identical cameras and identically seeded generators give identical images.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        log::debug!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
