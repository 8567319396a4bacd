//! I/O helpers shared by the command-line tool, tests and benches

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use crate::error::{EdgeError, Result};
use crate::models::{Channels, GrayBuffer, Raster, WHITE};

/// Convert a decoded image into a [`Raster`], keeping alpha when present
pub fn raster_from_image(img: DynamicImage) -> Result<Raster> {
    let (width, height) = img.dimensions();
    let (channels, data) = if img.color().has_alpha() {
        (Channels::Rgba, img.to_rgba8().into_raw())
    } else {
        (Channels::Rgb, img.to_rgb8().into_raw())
    };
    Raster::from_raw(width as usize, height as usize, channels, data)
}

/// Decode an image file into a [`Raster`]
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| EdgeError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    raster_from_image(img)
}

/// Save a gray buffer as an image; the format follows the file extension
pub fn save_gray(gray: &GrayBuffer, path: &Path) -> Result<()> {
    gray.to_gray_image()
        .save(path)
        .map_err(|source| EdgeError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Append `.svg` unless the path already ends in `.svg` or `.SVG`
pub fn ensure_svg_extension(path: &Path) -> PathBuf {
    let s = path.as_os_str().to_string_lossy();
    if s.ends_with(".svg") || s.ends_with(".SVG") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{s}.svg"))
    }
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
    /// Ratio of pure white pixels to total pixels.
    pub white_ratio: f64,
}

/// Compute min/max/avg and white ratio for a gray buffer.
pub fn grayscale_stats(gray: &GrayBuffer) -> GrayStats {
    let data = gray.as_bytes();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    let mut white = 0usize;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
        if v == WHITE {
            white += 1;
        }
    }
    if data.is_empty() {
        return GrayStats {
            min: 0,
            max: 0,
            avg: 0,
            white_ratio: 0.0,
        };
    }
    GrayStats {
        min,
        max,
        avg: (sum / data.len() as u64) as u8,
        white_ratio: white as f64 / data.len() as f64,
    }
}
