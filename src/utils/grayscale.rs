//! Grayscale reduction by channel averaging
//!
//! intensity = (R + G + B) / 3 with integer truncation. Alpha is never read and
//! never written.

use rayon::prelude::*;

use crate::models::{GrayBuffer, Raster};

#[inline]
fn average(px: &[u8]) -> u8 {
    ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8
}

/// Reduce a raster to gray in place: the average is written to R, G and B,
/// alpha is left untouched
pub fn reduce_in_place(raster: &mut Raster) {
    let n = raster.channels().count();
    for px in raster.as_bytes_mut().chunks_exact_mut(n) {
        let avg = average(px);
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    }
}

/// Row-parallel variant of [`reduce_in_place`]
pub fn reduce_in_place_parallel(raster: &mut Raster) {
    let n = raster.channels().count();
    let row_len = raster.width() * n;
    if row_len == 0 {
        return;
    }
    raster
        .as_bytes_mut()
        .par_chunks_mut(row_len)
        .for_each(|row| {
            for px in row.chunks_exact_mut(n) {
                let avg = average(px);
                px[0] = avg;
                px[1] = avg;
                px[2] = avg;
            }
        });
}

/// Convert an RGB or RGBA raster to a single-channel intensity buffer
pub fn rgb_to_grayscale(raster: &Raster) -> GrayBuffer {
    let n = raster.channels().count();
    let mut gray = GrayBuffer::new(raster.width(), raster.height());
    for (dst, px) in gray
        .as_bytes_mut()
        .iter_mut()
        .zip(raster.as_bytes().chunks_exact(n))
    {
        *dst = average(px);
    }
    gray
}

/// Convert to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(raster: &Raster) -> GrayBuffer {
    let width = raster.width();
    let n = raster.channels().count();
    let src = raster.as_bytes();
    let mut gray = GrayBuffer::new(width, raster.height());
    if width == 0 {
        return gray;
    }

    gray.as_bytes_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * width * n;
            for (x, dst) in row.iter_mut().enumerate() {
                let idx = row_start + x * n;
                *dst = average(&src[idx..idx + 3]);
            }
        });

    gray
}
