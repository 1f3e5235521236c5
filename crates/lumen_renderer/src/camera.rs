//! Camera for ray generation.

use lumen_math::{Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sampling::{random_in_unit_disk, sample_square};

/// Largest image width or height the camera accepts.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Camera settings that cannot produce a usable viewport.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("defocus angle must be finite and non-negative, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("image of {width}x{height} exceeds the {} pixel limit", MAX_IMAGE_DIMENSION)]
    ImageTooLarge { width: u32, height: f32 },

    #[error("view direction is zero or parallel to the up vector")]
    DegenerateBasis,
}

/// Inputs the camera is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Width over height of the output image
    pub aspect_ratio: f32,
    /// Image width in pixels (height follows from the aspect ratio)
    pub image_width: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Eye position
    pub look_from: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Camera-relative up direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees (0 = pinhole)
    pub defocus_angle: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,
    /// Jitter samples inside each pixel (box-filter anti-aliasing)
    pub jitter: bool,
    /// Normalize primary ray directions
    pub normalize_rays: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            vfov: 90.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            jitter: true,
            normalize_rays: true,
        }
    }
}

/// Viewport geometry derived from [`CameraSettings`]. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_angle: f32,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    jitter: bool,
    normalize_rays: bool,
}

impl Camera {
    /// Build the camera.
    ///
    /// An image height that rounds down to 0 is clamped to 1. Settings that
    /// cannot span a viewport are rejected.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        let aspect = settings.aspect_ratio;
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(CameraError::InvalidAspectRatio(aspect));
        }
        let vfov = settings.vfov;
        if !vfov.is_finite() || vfov <= 0.0 || vfov >= 180.0 {
            return Err(CameraError::InvalidFieldOfView(vfov));
        }
        if !settings.focus_dist.is_finite() || settings.focus_dist <= 0.0 {
            return Err(CameraError::InvalidFocusDistance(settings.focus_dist));
        }
        if !settings.defocus_angle.is_finite() || settings.defocus_angle < 0.0 {
            return Err(CameraError::InvalidDefocusAngle(settings.defocus_angle));
        }

        let image_width = settings.image_width.max(1);
        let exact_height = image_width as f32 / aspect;
        if image_width > MAX_IMAGE_DIMENSION || exact_height > MAX_IMAGE_DIMENSION as f32 {
            return Err(CameraError::ImageTooLarge {
                width: image_width,
                height: exact_height,
            });
        }

        let raw_height = exact_height as u32;
        let image_height = if raw_height < 1 {
            log::warn!(
                "Image height for width {} at aspect {} rounds to {}, clamping to 1",
                image_width,
                aspect,
                raw_height
            );
            1
        } else {
            raw_height
        };

        // Right vector must be well defined
        let view = settings.look_from - settings.look_at;
        let right = settings.vup.cross(view);
        let scale = settings.vup.length_squared() * view.length_squared();
        if !right.is_finite() || right.length_squared() <= 1e-12 * scale {
            return Err(CameraError::DegenerateBasis);
        }
        let w = view.normalize();
        let u = right.normalize();
        let v = w.cross(u);

        let center = settings.look_from;

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * settings.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - settings.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = settings.focus_dist * (settings.defocus_angle / 2.0).to_radians().tan();

        Ok(Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_angle: settings.defocus_angle,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
            jitter: settings.jitter,
            normalize_rays: settings.normalize_rays,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate a sample ray for pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.jitter {
            sample_square(rng)
        } else {
            Vec3::ZERO
        };

        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        self.make_ray(ray_origin, pixel_sample - ray_origin)
    }

    /// Ray from the eye through the exact center of pixel (i, j).
    pub fn center_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + i as f32 * self.pixel_delta_u + j as f32 * self.pixel_delta_v;
        self.make_ray(self.center, pixel_center - self.center)
    }

    fn make_ray(&self, origin: Vec3, direction: Vec3) -> Ray {
        if self.normalize_rays {
            Ray::new_unit(origin, direction)
        } else {
            Ray::new(origin, direction)
        }
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&CameraSettings::default()).unwrap();

        let (u, v, w) = camera.basis();
        assert!((u - Vec3::X).length() < 1e-6);
        assert!((v - Vec3::Y).length() < 1e-6);
        assert!((w - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_image_height_from_aspect() {
        let camera = Camera::new(&CameraSettings::default()).unwrap();
        assert_eq!(camera.image_width(), 400);
        assert_eq!(camera.image_height(), 225);
    }

    #[test]
    fn test_degenerate_height_clamped() {
        let settings = CameraSettings {
            aspect_ratio: 1000.0,
            image_width: 10,
            ..Default::default()
        };
        assert_eq!(Camera::new(&settings).unwrap().image_height(), 1);
    }

    #[test]
    fn test_center_ray_of_middle_pixel() {
        let settings = CameraSettings {
            aspect_ratio: 3.0,
            image_width: 3,
            ..Default::default()
        };
        let camera = Camera::new(&settings).unwrap();
        assert_eq!(camera.image_height(), 1);

        let ray = camera.center_ray(1, 0);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_corner_pixels_span_fov() {
        // 90° vertical FOV at focus distance 1: viewport is 2 units tall
        let settings = CameraSettings {
            aspect_ratio: 1.0,
            image_width: 2,
            normalize_rays: false,
            ..Default::default()
        };
        let camera = Camera::new(&settings).unwrap();

        let top_left = camera.center_ray(0, 0).direction();
        assert!((top_left - Vec3::new(-0.5, 0.5, -1.0)).length() < 1e-6);
        let bottom_right = camera.center_ray(1, 1).direction();
        assert!((bottom_right - Vec3::new(0.5, -0.5, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let settings = CameraSettings {
            aspect_ratio: 1.0,
            image_width: 2,
            normalize_rays: false,
            ..Default::default()
        };
        let camera = Camera::new(&settings).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // Pixel (0, 0) covers x in [-1, 0), y in (0, 1] on the z = -1 plane
        for _ in 0..200 {
            let d = camera.get_ray(0, 0, &mut rng).direction();
            assert!(d.x >= -1.0 && d.x < 0.0 + 1e-6);
            assert!(d.y > 0.0 - 1e-6 && d.y <= 1.0);
            assert!((d.z + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_defocus_origin_on_lens_disk() {
        let settings = CameraSettings {
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            defocus_angle: 10.0,
            focus_dist: 5.0,
            ..Default::default()
        };
        let camera = Camera::new(&settings).unwrap();
        let radius = 5.0 * (5.0f32).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(8);

        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(200, 112, &mut rng);
            let offset = ray.origin() - Vec3::new(0.0, 0.0, 5.0);
            assert!(offset.z.abs() < 1e-6);
            assert!(offset.length() <= radius + 1e-5);
            moved |= offset.length() > 1e-3;
        }
        assert!(moved);
    }

    #[test]
    fn test_pinhole_rays_share_origin() {
        let camera = Camera::new(&CameraSettings::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let ray = camera.get_ray(17, 33, &mut rng);
            assert_eq!(ray.origin(), Vec3::ZERO);
            assert!(ray.is_unit());
        }
    }

    #[test]
    fn test_rejects_bad_aspect_ratio() {
        for aspect_ratio in [0.0, -1.5, f32::NAN, f32::INFINITY] {
            let settings = CameraSettings {
                aspect_ratio,
                ..Default::default()
            };
            assert!(matches!(
                Camera::new(&settings),
                Err(CameraError::InvalidAspectRatio(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_field_of_view() {
        for vfov in [0.0, -10.0, 180.0, 270.0, f32::NAN] {
            let settings = CameraSettings {
                vfov,
                ..Default::default()
            };
            assert!(matches!(
                Camera::new(&settings),
                Err(CameraError::InvalidFieldOfView(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_focus_and_defocus() {
        for focus_dist in [0.0, -1.0, f32::INFINITY] {
            let settings = CameraSettings {
                focus_dist,
                ..Default::default()
            };
            assert!(matches!(
                Camera::new(&settings),
                Err(CameraError::InvalidFocusDistance(_))
            ));
        }

        let settings = CameraSettings {
            defocus_angle: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Camera::new(&settings),
            Err(CameraError::InvalidDefocusAngle(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let tall = CameraSettings {
            aspect_ratio: 1e-6,
            ..Default::default()
        };
        assert!(matches!(
            Camera::new(&tall),
            Err(CameraError::ImageTooLarge { width: 400, .. })
        ));

        let wide = CameraSettings {
            image_width: MAX_IMAGE_DIMENSION + 1,
            aspect_ratio: 1000.0,
            ..Default::default()
        };
        assert!(matches!(
            Camera::new(&wide),
            Err(CameraError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_basis() {
        let cases = [
            // Looking straight up along vup
            (Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y),
            // Eye on the target
            (Vec3::ONE, Vec3::ONE, Vec3::Y),
            // No up vector
            (Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO),
            (Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO, Vec3::Y),
        ];
        for (look_from, look_at, vup) in cases {
            let settings = CameraSettings {
                look_from,
                look_at,
                vup,
                ..Default::default()
            };
            assert_eq!(
                Camera::new(&settings).unwrap_err(),
                CameraError::DegenerateBasis,
                "{look_from:?} -> {look_at:?} up {vup:?}"
            );
        }
    }

    #[test]
    fn test_tilted_view_has_finite_basis() {
        let settings = CameraSettings {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            ..Default::default()
        };
        let camera = Camera::new(&settings).unwrap();
        let (u, v, w) = camera.basis();
        assert!(u.is_finite() && v.is_finite() && w.is_finite());
        assert!(camera.center_ray(200, 112).direction().is_finite());
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: CameraSettings = serde_json::from_str(
            r#"{ "look_from": [13.0, 2.0, 3.0], "look_at": [0.0, 0.0, 0.0], "vfov": 20.0, "jitter": false }"#,
        )
        .unwrap();

        assert_eq!(settings.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(settings.look_at, Vec3::ZERO);
        assert_eq!(settings.vfov, 20.0);
        assert!(!settings.jitter);
        assert_eq!(settings.image_width, 400);
        assert_eq!(settings.vup, Vec3::Y);
        assert!(Camera::new(&settings).is_ok());
    }
}
