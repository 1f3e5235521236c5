//! Lumen Core - scene storage for the sphere path tracer.
//!
//! This crate provides:
//!
//! - **Materials**: the closed [`Material`] set (diffuse, metal, glass)
//! - **Geometry store**: a fixed-capacity, append-only [`SphereStore`] with a
//!   structure-of-arrays view for batched intersection
//! - **Scene**: the material arena plus the store, built through
//!   [`Scene::add_sphere`] or from a serialized [`SceneDescription`]
//!
//! # Example
//!
//! ```
//! use lumen_core::{Material, Scene};
//! use lumen_math::Vec3;
//!
//! let mut scene = Scene::with_capacity(1);
//! let white = scene.add_material(Material::lambertian(Vec3::ONE));
//! scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, white)?;
//! assert_eq!(scene.sphere_count(), 1);
//! # Ok::<(), lumen_core::SceneError>(())
//! ```

pub mod description;
pub mod material;
pub mod scene;
pub mod store;

// Re-export commonly used types
pub use description::{MaterialEntry, SceneDescription, SphereEntry};
pub use material::{Color, Material, MaterialId};
pub use scene::{Scene, SceneError};
pub use store::{SoaView, Sphere, SphereId, SphereStore};
