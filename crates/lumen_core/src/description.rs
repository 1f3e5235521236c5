//! Serializable scene descriptions.
//!
//! A description names its materials and lets spheres refer to them by
//! name, which keeps hand-written JSON scene files readable:
//!
//! ```json
//! {
//!   "materials": [
//!     { "name": "ground", "material": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] } }
//!   ],
//!   "spheres": [
//!     { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::{Material, MaterialId};
use crate::scene::{Scene, SceneError};

/// A named material in a [`SceneDescription`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    pub material: Material,
}

/// A sphere in a [`SceneDescription`], referencing a material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereEntry {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

/// Declarative form of a [`Scene`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    #[serde(default)]
    pub spheres: Vec<SphereEntry>,
}

impl SceneDescription {
    /// Build a scene sized exactly for the described spheres.
    ///
    /// Later materials shadow earlier ones with the same name.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::with_capacity(self.spheres.len());
        let mut by_name: HashMap<&str, MaterialId> = HashMap::new();

        for entry in &self.materials {
            let id = scene.add_material(entry.material);
            by_name.insert(entry.name.as_str(), id);
        }

        for sphere in &self.spheres {
            let material = by_name
                .get(sphere.material.as_str())
                .copied()
                .ok_or_else(|| SceneError::UnknownMaterialName(sphere.material.clone()))?;
            scene.add_sphere(sphere.center, sphere.radius, material)?;
        }

        log::debug!(
            "Built scene: {} materials, {} spheres",
            scene.materials().len(),
            scene.sphere_count()
        );
        Ok(scene)
    }
}
