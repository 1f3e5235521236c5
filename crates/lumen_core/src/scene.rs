//! Scene representation consumed by the renderer.
//!
//! A scene owns a material table and a [`SphereStore`]. It is assembled
//! before rendering and then shared read-only by every render worker.

use lumen_math::Vec3;
use thiserror::Error;

use crate::material::{Material, MaterialId};
use crate::store::{Sphere, SphereId, SphereStore};

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere store is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("material id {0} does not belong to this scene")]
    UnknownMaterial(usize),

    #[error("no material named '{0}'")]
    UnknownMaterialName(String),
}

/// Spheres plus the materials they reference.
#[derive(Debug, Clone)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: SphereStore,
}

impl Scene {
    /// Create an empty scene that can hold `sphere_capacity` spheres.
    pub fn with_capacity(sphere_capacity: usize) -> Self {
        Self {
            materials: Vec::new(),
            spheres: SphereStore::with_capacity(sphere_capacity),
        }
    }

    /// Add a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material.sanitized());
        id
    }

    /// Add a sphere referencing a material of this scene.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<SphereId, SceneError> {
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material.0));
        }
        self.spheres.push(Sphere::new(center, radius, material))
    }

    /// Get a material by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this scene.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn spheres(&self) -> &SphereStore {
        &self.spheres
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }
}
