//! Lumen Renderer - CPU path tracing of sphere scenes.
//!
//! A Monte Carlo path tracer: the camera turns pixels into jittered primary
//! rays, the integrator bounces them through the scene's materials until
//! they escape to the sky, are absorbed, or run out of bounces, and the
//! scheduler spreads image rows over a fixed pool of workers.

mod batch;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod sampling;
mod scheduler;

pub use batch::{nearest_hit_batched, LANES};
pub use camera::{Camera, CameraError, CameraSettings, MAX_IMAGE_DIMENSION};
pub use hittable::{hit_sphere, nearest_hit, HitRecord, Intersector};
pub use material::{reflect, reflectance, refract, Scatter, ScatterResult};
pub use output::{color_to_rgb8, linear_to_gamma, quantize, ImageBuffer, OutputError};
pub use renderer::{ray_color, render_pixel, sky_gradient, Partition, RenderSettings, Shading};
pub use sampling::{
    gen_f32, gen_range, pixel_seed, random_in_unit_disk, random_unit_vector, sample_square,
};
pub use scheduler::{partition_rows, render, RenderError, RowTask};

/// Re-export the scene types and vector math this crate renders with.
pub use lumen_core::{Color, Material, MaterialId, Scene, SceneError};
pub use lumen_math::{Interval, Ray, Vec3};
