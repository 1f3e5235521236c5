//! Built-in demo scenes.

use lumen_core::{Color, Material, Scene, SceneError};
use lumen_math::Vec3;
use lumen_renderer::CameraSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::Demo;

/// Build the scene and matching camera for a demo.
pub fn build(demo: Demo) -> Result<(Scene, CameraSettings), SceneError> {
    match demo {
        Demo::TwoSpheres => two_spheres(),
        Demo::Materials => materials(),
        Demo::Cover => cover(0),
    }
}

fn two_spheres() -> Result<(Scene, CameraSettings), SceneError> {
    let mut scene = Scene::with_capacity(2);
    let ground = scene.add_material(Material::lambertian(Color::splat(0.5)));
    let center = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));

    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center)?;
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;

    Ok((scene, CameraSettings::default()))
}

fn materials() -> Result<(Scene, CameraSettings), SceneError> {
    let mut scene = Scene::with_capacity(5);
    let ground = scene.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Material::dielectric(1.5));
    let bubble = scene.add_material(Material::dielectric(1.0 / 1.5));
    let gold = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 1.0));

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, center)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.4, bubble)?;
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?;

    let camera = CameraSettings {
        vfov: 20.0,
        look_from: Vec3::new(-2.0, 2.0, 1.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        defocus_angle: 10.0,
        focus_dist: 3.4,
        ..Default::default()
    };
    Ok((scene, camera))
}

/// Upper bound on the cover scene's sphere count: ground, a 22x22 grid of
/// small spheres, and three large ones.
const COVER_CAPACITY: usize = 1 + 22 * 22 + 3;

fn cover(seed: u64) -> Result<(Scene, CameraSettings), SceneError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::with_capacity(COVER_CAPACITY);

    let ground = scene.add_material(Material::lambertian(Color::splat(0.5)));
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?;

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random_color(&mut rng, 0.5, 1.0);
                Material::metal(albedo, rng.gen_range(0.0..0.5))
            } else {
                Material::dielectric(1.5)
            };
            let id = scene.add_material(material);
            scene.add_sphere(center, 0.2, id)?;
        }
    }

    let glass = scene.add_material(Material::dielectric(1.5));
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)?;

    let brown = scene.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown)?;

    let mirror = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror)?;

    let camera = CameraSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 1200,
        vfov: 20.0,
        look_from: Vec3::new(13.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        ..Default::default()
    };
    Ok((scene, camera))
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_demo_builds() {
        for demo in [Demo::TwoSpheres, Demo::Materials, Demo::Cover] {
            let (scene, _) = build(demo).unwrap();
            assert!(scene.sphere_count() > 0, "{demo:?} is empty");
            assert!(scene.sphere_count() <= scene.spheres().capacity());
        }
    }

    #[test]
    fn test_cover_is_deterministic() {
        let (a, _) = cover(0).unwrap();
        let (b, _) = cover(0).unwrap();

        assert_eq!(a.sphere_count(), b.sphere_count());
        assert_eq!(a.spheres().as_slice(), b.spheres().as_slice());
        assert_eq!(a.materials(), b.materials());
    }

    #[test]
    fn test_cover_has_feature_spheres() {
        let (scene, camera) = cover(3).unwrap();
        let big = scene.spheres().iter().filter(|s| s.radius() == 1.0).count();

        assert_eq!(big, 3);
        assert_eq!(camera.focus_dist, 10.0);
    }
}
