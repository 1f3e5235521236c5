use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{CameraSettings, Intersector, RenderSettings, Shading};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// A diffuse sphere resting on a large ground sphere
    TwoSpheres,
    /// Diffuse, glass and metal spheres side by side
    Materials,
    /// Field of small random spheres around three large ones
    Cover,
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Path trace a scene of spheres to an image")]
pub struct Args {
    /// JSON project file with `camera`, `render` and `scene` sections
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no project file is given
    #[arg(long, value_enum, default_value = "cover")]
    pub demo: Demo,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Shade by surface normal instead of path tracing
    #[arg(long)]
    pub normals: bool,

    /// Test spheres one at a time instead of in batches
    #[arg(long)]
    pub scalar: bool,

    /// Hide the scanline progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of file or demo settings.
    pub fn apply(&self, camera: &mut CameraSettings, render: &mut RenderSettings) {
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            render.max_depth = depth;
        }
        if let Some(threads) = self.threads {
            render.threads = threads;
        }
        if let Some(seed) = self.seed {
            render.seed = seed;
        }
        if self.normals {
            render.shading = Shading::Normals;
        }
        if self.scalar {
            render.intersector = Intersector::Scalar;
        }
        if self.quiet {
            render.progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.demo, Demo::Cover);
        assert_eq!(args.output, PathBuf::from("output.ppm"));
        assert!(args.scene.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::try_parse_from([
            "lumen", "--demo", "two-spheres", "--width", "64", "-s", "5", "--depth", "3",
            "-j", "2", "--seed", "11", "--normals", "--scalar", "--quiet",
        ])
        .unwrap();
        assert_eq!(args.demo, Demo::TwoSpheres);

        let mut camera = CameraSettings::default();
        let mut render = RenderSettings::default();
        args.apply(&mut camera, &mut render);

        assert_eq!(camera.image_width, 64);
        assert_eq!(render.samples_per_pixel, 5);
        assert_eq!(render.max_depth, 3);
        assert_eq!(render.threads, 2);
        assert_eq!(render.seed, 11);
        assert_eq!(render.shading, Shading::Normals);
        assert_eq!(render.intersector, Intersector::Scalar);
        assert!(!render.progress);
    }

    #[test]
    fn test_no_overrides_keeps_settings() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        let mut camera = CameraSettings::default();
        let mut render = RenderSettings::default();
        args.apply(&mut camera, &mut render);

        assert_eq!(camera, CameraSettings::default());
        assert_eq!(render, RenderSettings::default());
    }
}
