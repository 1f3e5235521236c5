use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lumen_renderer::{render, Camera, RenderSettings};

mod cli;
mod demos;
mod project;

use cli::Args;
use project::Project;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    info!("lumen {}", env!("CARGO_PKG_VERSION"));

    let (scene, mut camera_settings, mut render_settings) = match &args.scene {
        Some(path) => {
            let project = Project::load(path)?;
            let scene = project
                .scene
                .build()
                .with_context(|| format!("invalid scene in {}", path.display()))?;
            info!("Loaded {} spheres from {}", scene.sphere_count(), path.display());
            (scene, project.camera, project.render)
        }
        None => {
            let (scene, camera) = demos::build(args.demo)
                .with_context(|| format!("failed to build demo scene {:?}", args.demo))?;
            info!("Built demo scene {:?} with {} spheres", args.demo, scene.sphere_count());
            (scene, camera, RenderSettings::default())
        }
    };
    args.apply(&mut camera_settings, &mut render_settings);

    let camera = Camera::new(&camera_settings).context("invalid camera settings")?;
    let image = render(&scene, &camera, &render_settings).context("render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
