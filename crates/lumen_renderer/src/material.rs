//! Surface scattering for the scene materials.

use lumen_core::{Color, Material};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_unit_vector};

/// Result of a scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel factor applied to the light carried back along `scattered`
    pub attenuation: Color,
    /// Outgoing ray, leaving from the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

impl Scatter for Material {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, ray_in, rec, rng))
            }
        }
    }
}

fn scatter_lambertian(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new_unit(rec.p, scatter_direction),
    }
}

fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let mut direction = reflect(ray_in.direction(), rec.normal);
    if fuzz > 0.0 {
        direction += fuzz * random_unit_vector(rng);
    }

    // Fuzzed reflections that end up below the surface are absorbed
    if direction.dot(rec.normal) > 0.0 {
        Some(ScatterResult {
            attenuation: albedo,
            scattered: Ray::new_unit(rec.p, direction),
        })
    } else {
        None
    }
}

fn scatter_dielectric(
    refraction_index: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let refraction_ratio = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = ray_in.direction().normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let direction =
        if cannot_refract || reflectance(cos_theta, refraction_index) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new_unit(rec.p, direction),
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}
