//! HitRecord and the scalar ray/sphere intersection.

use lumen_core::{Material, Scene, Sphere};
use lumen_math::{Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::batch::nearest_hit_batched;

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the sphere that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build the record for `sphere` hit by `ray` at parameter `t`.
    #[inline]
    pub fn new(ray: &Ray, t: f32, sphere: &Sphere, material: &'a Material) -> Self {
        let p = ray.at(t);
        let outward_normal = (p - sphere.center()) / sphere.radius();

        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// `half_b = D·(O-C)` and `c = |O-C|² - r²` for one sphere.
///
/// Shared by the scalar and batched paths so both evaluate the exact same
/// floating point expression.
#[inline(always)]
pub(crate) fn sphere_coefficients(
    origin: Vec3,
    direction: Vec3,
    cx: f32,
    cy: f32,
    cz: f32,
    radius_sq: f32,
) -> (f32, f32) {
    let ox = origin.x - cx;
    let oy = origin.y - cy;
    let oz = origin.z - cz;
    let half_b = direction.x * ox + direction.y * oy + direction.z * oz;
    let c = ox * ox + oy * oy + oz * oz - radius_sq;
    (half_b, c)
}

/// Smallest root of `a t² + 2 half_b t + c` strictly inside `ray_t`.
#[inline(always)]
pub(crate) fn nearest_root(half_b: f32, c: f32, a: f32, ray_t: Interval) -> Option<f32> {
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-half_b - sqrtd) / a;
    if ray_t.surrounds(near) {
        return Some(near);
    }
    let far = (-half_b + sqrtd) / a;
    if ray_t.surrounds(far) {
        return Some(far);
    }
    None
}

/// Ray parameter of the nearest hit on `sphere` inside `ray_t`, if any.
#[inline]
pub fn hit_sphere(sphere: &Sphere, ray: &Ray, ray_t: Interval) -> Option<f32> {
    let center = sphere.center();
    let (half_b, c) = sphere_coefficients(
        ray.origin(),
        ray.direction(),
        center.x,
        center.y,
        center.z,
        sphere.radius() * sphere.radius(),
    );
    nearest_root(half_b, c, ray.quadratic_a(), ray_t)
}

/// Nearest hit among all spheres of the scene, testing them one at a time.
///
/// The upper bound shrinks to the best `t` found so far, so the result is
/// the globally closest hit regardless of sphere order.
pub fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
    let mut closest_so_far = ray_t.max;
    let mut closest: Option<&Sphere> = None;

    for sphere in scene.spheres().iter() {
        if let Some(t) = hit_sphere(sphere, ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = t;
            closest = Some(sphere);
        }
    }

    closest.map(|sphere| {
        HitRecord::new(ray, closest_so_far, sphere, scene.material(sphere.material()))
    })
}

/// Which closest-hit routine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intersector {
    /// One sphere at a time.
    Scalar,
    /// Fixed-width groups over the structure-of-arrays view.
    #[default]
    Batched,
}

impl Intersector {
    #[inline]
    pub fn nearest_hit<'a>(
        self,
        scene: &'a Scene,
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<HitRecord<'a>> {
        match self {
            Intersector::Scalar => nearest_hit(scene, ray, ray_t),
            Intersector::Batched => nearest_hit_batched(scene, ray, ray_t),
        }
    }
}
