//! Scanline scheduling across a fixed worker pool.
//!
//! The pixel buffer is split into rows, rows are dealt out to workers with a
//! static [`Partition`], and every worker receives exclusive `&mut` access to
//! its rows only. The scene and camera are shared read-only, so the only
//! synchronization is the pool's scope acting as a join barrier.

use std::num::NonZeroUsize;
use std::time::Instant;

use indicatif::style::TemplateError;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::{Color, Scene};
use thiserror::Error;

use crate::camera::Camera;
use crate::output::ImageBuffer;
use crate::renderer::{render_pixel, Partition, RenderSettings};

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid render settings: {0}")]
    InvalidSettings(&'static str),

    #[error("invalid progress bar template: {0}")]
    ProgressTemplate(#[from] TemplateError),
}

/// The rows one worker renders.
pub struct RowTask<'a> {
    pub worker: usize,
    pub rows: Vec<(u32, &'a mut [Color])>,
}

/// Deal the rows of `pixels` out to `workers` tasks.
///
/// Every row lands in exactly one task. Rows keep ascending order within a
/// task.
pub fn partition_rows(
    pixels: &mut [Color],
    width: u32,
    workers: usize,
    partition: Partition,
) -> Vec<RowTask<'_>> {
    let workers = workers.max(1);
    let width = width.max(1) as usize;
    let height = pixels.len() / width;
    let rows_per_band = height.div_ceil(workers).max(1);

    let mut tasks: Vec<RowTask<'_>> = (0..workers)
        .map(|worker| RowTask {
            worker,
            rows: Vec::new(),
        })
        .collect();

    for (j, row) in pixels.chunks_mut(width).enumerate() {
        let worker = match partition {
            Partition::Bands => j / rows_per_band,
            Partition::Interleaved => j % workers,
        };
        tasks[worker].rows.push((j as u32, row));
    }

    tasks
}

/// Number of workers to use for `settings` on an image `height` rows tall.
fn worker_count(settings: &RenderSettings, height: u32) -> usize {
    let requested = if settings.threads == 0 {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    } else {
        settings.threads
    };
    // Never more workers than rows
    requested.clamp(1, height.max(1) as usize)
}

/// Scanline counter, hidden when `enabled` is false.
fn progress_bar(rows: u32, enabled: bool) -> Result<ProgressBar, RenderError> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(u64::from(rows));
    bar.set_style(ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] {bar:40} {pos}/{len} scanlines ETA: {eta}",
    )?);
    bar.set_message("Rendering");
    Ok(bar)
}

fn render_rows(
    task: RowTask<'_>,
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    progress: &ProgressBar,
) {
    let start = Instant::now();
    let row_count = task.rows.len();

    for (j, row) in task.rows {
        for (i, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(camera, scene, i as u32, j, settings);
        }
        progress.inc(1);
    }

    log::debug!(
        "Worker {} finished {} rows in {:.2?}",
        task.worker,
        row_count,
        start.elapsed()
    );
}

/// Render the entire scene to an image buffer.
///
/// Blocks until every worker has finished. A worker panic propagates to the
/// caller.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<ImageBuffer, RenderError> {
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::InvalidSettings("samples_per_pixel must be at least 1"));
    }

    let width = camera.image_width();
    let height = camera.image_height();
    let workers = worker_count(settings, height);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lumen-worker-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} spheres on {} workers ({:?}, {:?})",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        scene.sphere_count(),
        workers,
        settings.partition,
        settings.intersector,
    );

    let start = Instant::now();
    let progress = progress_bar(height, settings.progress)?;
    let mut image = ImageBuffer::new(width, height);
    let tasks = partition_rows(&mut image.pixels, width, workers, settings.partition);

    pool.scope(|s| {
        for task in tasks {
            let progress = &progress;
            s.spawn(move |_| render_rows(task, scene, camera, settings, progress));
        }
    });
    progress.finish_with_message("Done");

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}
