//! Surface materials.
//!
//! The set of materials is closed, so it is an enum dispatched by `match`
//! rather than a trait object. Spheres refer to materials by [`MaterialId`];
//! the materials themselves live in the [`Scene`](crate::Scene).

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Handle to a material stored in a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    /// Position of the material in the scene's material table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a surface scatters light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Mirror reflection, blurred by `fuzz` (0 = perfect mirror, 1 = very rough).
    Metal { albedo: Color, fuzz: f32 },
    /// Clear glass-like refractor.
    Dielectric { refraction_index: f32 },
}

impl Material {
    /// Create a diffuse material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal material. `fuzz` is clamped to `[0, 1]`.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Re-apply the constructor invariants. Used on materials that did not
    /// come through the constructors (e.g. deserialized ones).
    pub fn sanitized(self) -> Self {
        match self {
            Material::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_fuzz_clamped() {
        let rough = Material::metal(Vec3::ONE, 3.0);
        assert_eq!(rough, Material::Metal { albedo: Vec3::ONE, fuzz: 1.0 });

        let negative = Material::metal(Vec3::ONE, -0.5);
        assert_eq!(negative, Material::Metal { albedo: Vec3::ONE, fuzz: 0.0 });
    }

    #[test]
    fn test_sanitized_clamps_raw_metal() {
        let raw = Material::Metal { albedo: Vec3::ONE, fuzz: 7.0 };
        assert_eq!(raw.sanitized(), Material::metal(Vec3::ONE, 1.0));

        let glass = Material::dielectric(1.5);
        assert_eq!(glass.sanitized(), glass);
    }

    #[test]
    fn test_material_json_tagging() {
        let json = r#"{ "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material, Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.3));
    }
}
