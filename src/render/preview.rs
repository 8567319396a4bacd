//! Raster preview of traced segments.
//!
//! Draws every segment as a 1-pixel black line on a transparent canvas.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{EdgeError, Result};
use crate::models::{Point, Segment};

/// Line color
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Render `segments` onto a transparent `width`×`height` canvas
pub fn render_segments(segments: &[Segment], width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for segment in segments {
        draw_line(&mut canvas, segment.start, segment.end, INK);
    }
    canvas
}

/// Bresenham line from `from` to `to`, both ends inclusive; pixels outside the
/// canvas are skipped
pub fn draw_line(canvas: &mut RgbaImage, from: Point, to: Point, color: Rgba<u8>) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
            canvas.put_pixel(x as u32, y as u32, color);
        }
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Write an RGBA preview to disk; the format follows the file extension
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|source| EdgeError::Image {
        path: path.to_path_buf(),
        source,
    })
}
