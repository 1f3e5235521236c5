//! Random sampling primitives.
//!
//! Every function takes the generator explicitly; there is no global or
//! thread-local random state. The scheduler seeds one generator per pixel
//! with [`pixel_seed`], so the samples a pixel receives do not depend on
//! which worker renders it.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform `f32` in `[min, max)`.
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection-samples the cube `[-1, 1)³` until the point falls inside the
/// unit ball, then projects it onto the surface.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        // Points too close to the origin lose precision when normalized.
        if len_sq > 1e-6 && len_sq < 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the xy-plane (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Offset in the square `[-0.5, 0.5)²` (z = 0) for box-filter jitter.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

/// Seed for the generator of pixel `(x, y)`.
///
/// SplitMix64 finalizer over the render seed and the pixel coordinates.
pub fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    let mut z = seed ^ ((u64::from(y) << 32) | u64::from(x));
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
