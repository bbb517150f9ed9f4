//! Built-in scenes.
//!
//! Each scene returns its surfaces together with the camera it was framed
//! for. Command-line flags and config files adjust the camera afterwards.

use clap::ValueEnum;
use glint_math::{random_f64, random_range, random_vec};
use glint_renderer::{
    CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, Sphere,
    Vec3,
};
use rand::RngCore;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Small blue sphere on a yellow ground
    Quickstart,
    /// Diffuse center sphere between two metal spheres
    Materials,
    /// Hollow glass sphere, diffuse center and a fuzzy metal sphere
    Glass,
    /// Field of random small spheres with depth of field
    Cover,
}

/// Build the surfaces and default camera for `kind`.
///
/// Only [`SceneKind::Cover`] consumes randomness.
pub fn build(kind: SceneKind, rng: &mut dyn RngCore) -> (HittableList, CameraSettings) {
    match kind {
        SceneKind::Quickstart => quickstart(),
        SceneKind::Materials => materials(),
        SceneKind::Glass => glass(),
        SceneKind::Cover => cover(rng),
    }
}

fn sphere(center: Point3, radius: f64, material: &Arc<dyn Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, Arc::clone(material)))
}

fn ground() -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)))
}

fn quickstart() -> (HittableList, CameraSettings) {
    let material_ground = ground();
    let material_center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &material_ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &material_center));

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50)
        .with_lens(90.0, 0.0, 1.0);

    (world, camera)
}

fn materials() -> (HittableList, CameraSettings) {
    let material_ground = ground();
    let material_center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let material_left: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8), 0.3));
    let material_right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &material_ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.2), 0.5, &material_center));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, &material_left));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &material_right));

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50)
        .with_lens(90.0, 0.0, 1.0);

    (world, camera)
}

fn glass() -> (HittableList, CameraSettings) {
    let material_ground = ground();
    let material_center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let material_left: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    // Air inside glass: the index is relative to the enclosing medium
    let material_bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let material_right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &material_ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.2), 0.5, &material_center));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, &material_left));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, &material_bubble));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &material_right));

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50)
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 10.0, 3.4);

    (world, camera)
}

fn cover(rng: &mut dyn RngCore) -> (HittableList, CameraSettings) {
    let mut world = HittableList::new();

    let material_ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &material_ground));

    // Keep the small spheres clear of the large metal one
    let clearance_center = Point3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            if (center - clearance_center).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec(rng, 0.0, 1.0) * random_vec(rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                // Glass
                Arc::new(Dielectric::new(1.5))
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let brown: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let steel: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));

    world.add(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, &glass));
    world.add(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, &brown));
    world.add(sphere(Point3::new(4.0, 1.0, 0.0), 1.0, &steel));

    log::debug!("Cover scene has {} spheres", world.len());

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 1200)
        .with_quality(500, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    (world, camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::{Hittable, Interval, Ray};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_quickstart_layout() {
        let mut rng = StdRng::seed_from_u64(0);
        let (world, camera) = build(SceneKind::Quickstart, &mut rng);

        assert_eq!(world.len(), 2);
        assert_eq!(camera.image_width, 400);
        assert_eq!(camera.image_height(), 225);
        assert_eq!(camera.defocus_angle, 0.0);

        // Straight ahead hits the small sphere at z = -0.5
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let rec = world
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("center sphere");
        assert!((rec.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_every_scene_has_valid_camera() {
        let mut rng = StdRng::seed_from_u64(0);
        for kind in SceneKind::value_variants() {
            let (world, camera) = build(*kind, &mut rng);
            assert!(!world.is_empty());
            assert_eq!(camera.validate(), Ok(()), "{kind:?}");
        }
    }

    #[test]
    fn test_glass_scene_has_bubble() {
        let mut rng = StdRng::seed_from_u64(0);
        let (world, _) = build(SceneKind::Glass, &mut rng);
        assert_eq!(world.len(), 5);
    }

    #[test]
    fn test_cover_scene_is_seeded() {
        let (first, _) = build(SceneKind::Cover, &mut StdRng::seed_from_u64(99));
        let (second, _) = build(SceneKind::Cover, &mut StdRng::seed_from_u64(99));
        assert_eq!(first.len(), second.len());
        // Ground, three large spheres and most of the 22x22 grid
        assert!(first.len() > 400);
        assert!(first.len() <= 1 + 22 * 22 + 3);
    }
}
