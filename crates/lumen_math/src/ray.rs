use crate::Vec3;

/// A half-line with an origin and a direction.
///
/// A ray built with [`Ray::new_unit`] carries a normalized direction and
/// remembers it, which lets sphere tests drop the `|D|²` coefficient of the
/// quadratic (it is exactly 1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    unit: bool,
}

impl Ray {
    /// Create a ray with an arbitrary (non-zero) direction.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            unit: false,
        }
    }

    /// Create a ray whose direction is normalized up front.
    #[inline]
    pub fn new_unit(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            unit: true,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// True when the direction was normalized at construction.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.unit
    }

    /// The `a` coefficient of the ray/sphere quadratic, `|D|²`.
    #[inline]
    pub fn quadratic_a(&self) -> f32 {
        if self.unit {
            1.0
        } else {
            self.direction.length_squared()
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);

        assert_eq!(ray.at(0.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(5.0), Vec3::new(6.0, 7.0, 8.0));
        assert_eq!(ray.at(-1.0), Vec3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn test_unit_ray_normalizes() {
        let ray = Ray::new_unit(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));

        assert!(ray.is_unit());
        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.quadratic_a(), 1.0);
    }

    #[test]
    fn test_quadratic_a_for_raw_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));

        assert!(!ray.is_unit());
        assert_eq!(ray.quadratic_a(), 25.0);
    }
}
