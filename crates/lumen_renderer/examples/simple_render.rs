//! Simple path tracer example.
//!
//! Renders three spheres on a ground sphere and saves to PPM format.

use lumen_renderer::{
    render, Camera, CameraSettings, Color, Material, RenderSettings, Scene, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut scene = Scene::with_capacity(4);
    let ground = scene.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let matte = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Material::dielectric(1.5));
    let gold = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.1));

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, matte)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?;
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?;

    let camera = Camera::new(&CameraSettings {
        image_width: 400,
        ..Default::default()
    })?;
    let settings = RenderSettings {
        samples_per_pixel: 50,
        max_depth: 10,
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        settings.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &settings)?;
    println!("Rendered in {:?}", start.elapsed());

    image.save("output.ppm")?;
    println!("Saved to output.ppm");
    Ok(())
}
