//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded bounce depth, evaluated as a loop carrying the path throughput
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use lumen_core::{Color, Scene};
use lumen_math::{Interval, Ray};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::hittable::Intersector;
use crate::material::Scatter;
use crate::sampling::pixel_seed;

/// What a primary ray evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Full light transport through the materials
    #[default]
    PathTrace,
    /// Surface normal mapped to a color, `0.5 * (n + 1)`; sky on miss
    Normals,
}

/// How rows are split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Contiguous blocks of rows, one block per worker
    #[default]
    Bands,
    /// Row `j` goes to worker `j mod workers`
    Interleaved,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker count; 0 uses one worker per available core
    pub threads: usize,
    /// Row partitioning across workers
    pub partition: Partition,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
    /// Closest-hit routine
    pub intersector: Intersector,
    /// Path tracing or normal visualization
    pub shading: Shading,
    /// Show a scanline progress bar on stderr
    pub progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            threads: 0,
            partition: Partition::Bands,
            seed: 0,
            intersector: Intersector::Batched,
            shading: Shading::PathTrace,
            progress: true,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Each bounce multiplies the running throughput by the material's
/// attenuation. The path ends on a miss (sky times throughput), on
/// absorption, or after `depth` bounces (both black).
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    if settings.shading == Shading::Normals {
        return normal_color(ray, scene, depth, settings.intersector);
    }

    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = settings.intersector.nearest_hit(scene, &ray, Interval::FORWARD) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted
    Color::ZERO
}

fn normal_color(ray: &Ray, scene: &Scene, depth: u32, intersector: Intersector) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }
    match intersector.nearest_hit(scene, ray, Interval::FORWARD) {
        Some(rec) => 0.5 * (rec.normal + Color::ONE),
        None => sky_gradient(ray),
    }
}

/// Background seen by rays that escape the scene: white at the horizon
/// blending to sky blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// The pixel's random stream is seeded from `settings.seed` and the pixel
/// coordinates only.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    settings: &RenderSettings,
) -> Color {
    let mut rng = SmallRng::seed_from_u64(pixel_seed(settings.seed, x, y));
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let ray = camera.get_ray(x, y, &mut rng);
        pixel_color += ray_color(&ray, scene, settings.max_depth, settings, &mut rng);
    }

    // Average the samples
    pixel_color / settings.samples_per_pixel as f32
}
