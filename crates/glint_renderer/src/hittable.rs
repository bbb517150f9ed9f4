//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point, owned by the scene
    pub material: &'a dyn Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the normal against the incoming ray.
    ///
    /// `outward_normal` must have unit length.
    pub fn new(
        ray: &Ray,
        t: f64,
        p: Point3,
        outward_normal: Vec3,
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `ray` whose parameter lies strictly
    /// inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// A list of hittable objects.
///
/// Queries are linear in the number of children.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use glint_math::Color;
    use std::sync::Arc;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn sphere_at_z(z: f64, radius: f64) -> Box<dyn Hittable> {
        Box::new(Sphere::new(Point3::new(0.0, 0.0, z), radius, gray()))
    }

    #[test]
    fn test_face_normal_front_and_back() {
        let material = Lambertian::new(Color::ONE);
        let outward = Vec3::Z;

        let incoming = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let rec = HitRecord::new(&incoming, 1.0, Point3::ZERO, outward, &material);
        assert!(rec.front_face);
        assert_eq!(rec.normal, outward);

        let outgoing = Ray::new(Point3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&outgoing, 1.0, Point3::ZERO, outward, &material);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -outward);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_nearest_regardless_of_order() {
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        let interval = Interval::new(0.001, f64::INFINITY);

        // Overlapping spheres along -Z; nearest front surface is at t = 2.5
        let mut far_first = HittableList::new();
        far_first.add(sphere_at_z(-10.0, 1.0));
        far_first.add(sphere_at_z(-5.0, 2.0));
        far_first.add(sphere_at_z(-3.0, 0.5));
        far_first.add(sphere_at_z(-4.0, 1.0));

        let rec = far_first.hit(&ray, interval).expect("ray should hit");
        assert!((rec.t - 2.5).abs() < 1e-12);

        let mut near_first = HittableList::new();
        near_first.add(sphere_at_z(-3.0, 0.5));
        near_first.add(sphere_at_z(-10.0, 1.0));
        near_first.add(sphere_at_z(-5.0, 2.0));
        assert_eq!(near_first.len(), 3);

        let rec = near_first.hit(&ray, interval).expect("ray should hit");
        assert!((rec.t - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_list_respects_interval_max() {
        let mut world = HittableList::new();
        world.add(sphere_at_z(-10.0, 1.0));

        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 5.0)).is_none());

        world.clear();
        assert!(world.is_empty());
    }
}
