//! Pixel buffer and image file output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lumen_core::Color;
use lumen_math::Interval;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Linear color buffer for storing render output, row-major from the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-encoded 8-bit RGB triplets, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Write the image as ASCII PPM (`P3`), one pixel per line.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            let [r, g, b] = color_to_rgb8(*color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
        Ok(())
    }

    /// Save to `path`, choosing the format from the extension
    /// (`.ppm` or `.png`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)?;
                writer.flush()?;
            }
            "png" => {
                image::save_buffer(
                    path,
                    &self.to_rgb8(),
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                )?;
            }
            _ => return Err(OutputError::UnsupportedFormat(extension)),
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Linear channel value to an 8-bit channel: gamma-encode, clamp to
/// `[0, 0.99999]`, scale by 256 and truncate.
#[inline]
pub fn quantize(linear: f32) -> u8 {
    const INTENSITY: Interval = Interval::new(0.0, 0.99999);
    (INTENSITY.clamp(linear_to_gamma(linear)) * 256.0) as u8
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}
