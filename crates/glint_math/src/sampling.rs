//! Vector helpers for scattering: random directions, reflection, refraction.
//!
//! All randomness comes from a caller-provided generator so renders can be
//! seeded and reproduced.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Components with magnitude below this are treated as zero.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Lower bound on the squared length of an accepted sphere sample. Anything
/// smaller would blow up when normalized.
const MIN_SAMPLE_LENGTH_SQUARED: f64 = 1e-160;

/// Uniform random number in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform random number in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// True if every component is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling inside the unit ball keeps the distribution uniform
    loop {
        let p = random_vec(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if MIN_SAMPLE_LENGTH_SQUARED < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Unit vector on the hemisphere around `normal`.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Random point inside the unit disk in the XY plane (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices (incident over
/// transmitted).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-7, 0.0)));
        assert!(!near_zero(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_random_unit_vector_covers_sphere() {
        // The mean of uniform directions should sit near the origin
        let mut rng = StdRng::seed_from_u64(11);
        let n = 20_000;
        let mut sum = Vec3::ZERO;
        for _ in 0..n {
            sum += random_unit_vector(&mut rng);
        }
        let mean = sum / n as f64;
        assert!(mean.length() < 0.05, "mean = {mean:?}");
    }

    #[test]
    fn test_random_on_hemisphere() {
        let mut rng = StdRng::seed_from_u64(3);
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        for _ in 0..1000 {
            let v = random_on_hemisphere(&mut rng, normal);
            assert!(v.dot(normal) >= 0.0);
            assert!((v.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let x = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
            let u = random_f64(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let n = Vec3::new(1.0, 2.0, -0.5).normalize();
        for v in [
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.3, 0.2, 5.0),
            Vec3::new(-4.0, 0.0, 1.0),
        ] {
            let r = reflect(v, n);
            assert!((r.dot(n) + v.dot(n)).abs() < EPS);
            // Reflection preserves length
            assert!((r.length() - v.length()).abs() < EPS);
        }
    }

    #[test]
    fn test_reflect_normal_incidence_is_antiparallel() {
        let n = Vec3::Y;
        let v = Vec3::new(0.0, -2.0, 0.0);
        assert_eq!(reflect(v, n), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_passes_straight_through() {
        let n = Vec3::Y;
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, n, 1.0);
        assert!((out - uv).length() < EPS);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let n = Vec3::Y;
        let uv = Vec3::new(0.5, -(0.75f64).sqrt(), 0.0);
        let eta = 1.0 / 1.5;
        let out = refract(uv, n, eta);

        let sin_in = uv.cross(n).length();
        let sin_out = out.normalize().cross(n).length();
        assert!((sin_in * eta - sin_out).abs() < EPS);
        // Transmitted ray stays below the surface
        assert!(out.y < 0.0);
    }
}
