//! Fixed-capacity, append-only sphere storage.
//!
//! Spheres are kept twice: as whole records (for building hit records) and
//! as four parallel arrays `x`, `y`, `z`, `radius²` that the batched
//! intersector streams through. Both views are sized once at creation and
//! never reallocate.

use lumen_math::Vec3;

use crate::material::MaterialId;
use crate::scene::SceneError;

/// Index of a sphere in its [`SphereStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SphereId(pub(crate) usize);

impl SphereId {
    /// Position of the sphere in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A sphere primitive. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. The radius is validated when the sphere is
    /// pushed into a store.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn material(&self) -> MaterialId {
        self.material
    }
}

/// Structure-of-arrays view over a [`SphereStore`].
///
/// All slices have the same length as the store.
#[derive(Debug, Clone, Copy)]
pub struct SoaView<'a> {
    pub xs: &'a [f32],
    pub ys: &'a [f32],
    pub zs: &'a [f32],
    pub radius_sq: &'a [f32],
}

impl SoaView<'_> {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Append-only sphere storage with a capacity fixed at creation.
#[derive(Debug, Clone)]
pub struct SphereStore {
    capacity: usize,
    spheres: Vec<Sphere>,
    xs: Vec<f32>,
    ys: Vec<f32>,
    zs: Vec<f32>,
    radius_sq: Vec<f32>,
}

impl SphereStore {
    /// Create an empty store that can hold `capacity` spheres.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            spheres: Vec::with_capacity(capacity),
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
            radius_sq: Vec::with_capacity(capacity),
        }
    }

    /// Append a sphere.
    ///
    /// Fails with [`SceneError::CapacityExceeded`] once the store is full and
    /// with [`SceneError::InvalidRadius`] for non-positive or non-finite radii.
    pub fn push(&mut self, sphere: Sphere) -> Result<SphereId, SceneError> {
        if self.spheres.len() == self.capacity {
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
            return Err(SceneError::InvalidRadius(sphere.radius));
        }

        let id = SphereId(self.spheres.len());
        self.xs.push(sphere.center.x);
        self.ys.push(sphere.center.y);
        self.zs.push(sphere.center.z);
        self.radius_sq.push(sphere.radius * sphere.radius);
        self.spheres.push(sphere);
        Ok(id)
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Maximum number of spheres this store accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a sphere by id.
    pub fn get(&self, id: SphereId) -> Option<&Sphere> {
        self.spheres.get(id.0)
    }

    /// All spheres in insertion order.
    pub fn as_slice(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sphere> {
        self.spheres.iter()
    }

    /// Parallel-array view for batch processing.
    pub fn soa(&self) -> SoaView<'_> {
        SoaView {
            xs: &self.xs,
            ys: &self.ys,
            zs: &self.zs,
            radius_sq: &self.radius_sq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32, radius: f32) -> Sphere {
        Sphere::new(Vec3::new(x, 1.0, -2.0), radius, MaterialId(0))
    }

    #[test]
    fn test_push_until_full() {
        let mut store = SphereStore::with_capacity(2);

        assert_eq!(store.push(sphere(0.0, 1.0)).unwrap(), SphereId(0));
        assert_eq!(store.push(sphere(1.0, 1.0)).unwrap(), SphereId(1));

        let err = store.push(sphere(2.0, 1.0)).unwrap_err();
        assert!(matches!(err, SceneError::CapacityExceeded { capacity: 2 }));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut store = SphereStore::with_capacity(0);
        assert!(store.push(sphere(0.0, 1.0)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut store = SphereStore::with_capacity(4);

        assert!(matches!(store.push(sphere(0.0, 0.0)), Err(SceneError::InvalidRadius(_))));
        assert!(matches!(store.push(sphere(0.0, -1.0)), Err(SceneError::InvalidRadius(_))));
        assert!(matches!(store.push(sphere(0.0, f32::NAN)), Err(SceneError::InvalidRadius(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_soa_mirrors_records() {
        let mut store = SphereStore::with_capacity(3);
        let first = store.push(sphere(0.0, 0.5)).unwrap();
        let second = store.push(sphere(3.0, 2.0)).unwrap();
        assert_eq!((first.index(), second.index()), (0, 1));

        let soa = store.soa();
        assert_eq!(soa.len(), 2);
        assert_eq!(soa.xs, &[0.0, 3.0]);
        assert_eq!(soa.ys, &[1.0, 1.0]);
        assert_eq!(soa.zs, &[-2.0, -2.0]);
        assert_eq!(soa.radius_sq, &[0.25, 4.0]);

        assert_eq!(store.get(second).unwrap().radius(), 2.0);
        assert!(store.get(SphereId(2)).is_none());
    }
}
