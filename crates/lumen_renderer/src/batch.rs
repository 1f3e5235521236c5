//! Batched closest-hit search over the structure-of-arrays sphere view.
//!
//! Spheres are processed in groups of [`LANES`]. The quadratic coefficients
//! for a whole group are computed in straight-line loops over fixed-size
//! arrays, which the compiler turns into SIMD code. A group whose largest
//! discriminant is negative is skipped; otherwise each lane is resolved in
//! order against the running upper bound, exactly as the scalar path does.
//! Spheres left over after the last full group go through the scalar test.

use lumen_core::Scene;
use lumen_math::{Interval, Ray};

use crate::hittable::{nearest_root, sphere_coefficients, HitRecord};

/// Number of spheres tested together.
pub const LANES: usize = 8;

/// Nearest hit among all spheres, in groups of [`LANES`].
///
/// Returns the same record as [`nearest_hit`](crate::nearest_hit) for every
/// scene and ray.
pub fn nearest_hit_batched<'a>(
    scene: &'a Scene,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let soa = scene.spheres().soa();
    let origin = ray.origin();
    let direction = ray.direction();
    let a = ray.quadratic_a();

    let mut closest_so_far = ray_t.max;
    let mut closest: Option<usize> = None;

    let mut xs = soa.xs.chunks_exact(LANES);
    let mut ys = soa.ys.chunks_exact(LANES);
    let mut zs = soa.zs.chunks_exact(LANES);
    let mut rs = soa.radius_sq.chunks_exact(LANES);

    let mut base = 0;
    for (((gx, gy), gz), gr) in (&mut xs).zip(&mut ys).zip(&mut zs).zip(&mut rs) {
        let mut half_b = [0.0f32; LANES];
        let mut c = [0.0f32; LANES];
        let mut discriminant = [0.0f32; LANES];

        for lane in 0..LANES {
            let (hb, cc) =
                sphere_coefficients(origin, direction, gx[lane], gy[lane], gz[lane], gr[lane]);
            half_b[lane] = hb;
            c[lane] = cc;
            discriminant[lane] = hb * hb - a * cc;
        }

        let max_disc = discriminant.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max_disc < 0.0 {
            base += LANES;
            continue;
        }

        for lane in 0..LANES {
            if discriminant[lane] < 0.0 {
                continue;
            }
            let bound = ray_t.with_max(closest_so_far);
            if let Some(t) = nearest_root(half_b[lane], c[lane], a, bound) {
                closest_so_far = t;
                closest = Some(base + lane);
            }
        }
        base += LANES;
    }

    let tail = xs
        .remainder()
        .iter()
        .zip(ys.remainder())
        .zip(zs.remainder())
        .zip(rs.remainder());
    for (offset, (((&x, &y), &z), &r2)) in tail.enumerate() {
        let (half_b, c) = sphere_coefficients(origin, direction, x, y, z, r2);
        if let Some(t) = nearest_root(half_b, c, a, ray_t.with_max(closest_so_far)) {
            closest_so_far = t;
            closest = Some(base + offset);
        }
    }

    closest.map(|index| {
        let sphere = &scene.spheres().as_slice()[index];
        HitRecord::new(ray, closest_so_far, sphere, scene.material(sphere.material()))
    })
}
