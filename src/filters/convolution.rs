//! Windowed gradient convolution
//!
//! For every window origin (x, y) with the whole K×K window inside the image,
//! `mag = floor(sqrt(gx² + gy²))` clamped to 255 is written at the origin
//! corner, not the window center. The strip of K-1 columns on the right and
//! K-1 rows at the bottom keeps its input value.

use log::{debug, warn};
use rayon::prelude::*;

use super::operator::{KernelPair, Operator};
use crate::models::GrayBuffer;

/// Gradient magnitude of the window whose top-left corner is (x, y)
///
/// The caller guarantees the window fits inside `gray`.
#[inline]
pub fn window_magnitude(gray: &GrayBuffer, kernels: &KernelPair, x: usize, y: usize) -> u8 {
    let mut sum_x = 0i32;
    let mut sum_y = 0i32;
    for dy in 0..kernels.size {
        let row = &gray.row(y + dy)[x..x + kernels.size];
        for (dx, &v) in row.iter().enumerate() {
            let v = v as i32;
            sum_x += v * kernels.gx_at(dy, dx);
            sum_y += v * kernels.gy_at(dy, dx);
        }
    }
    let mag = ((sum_x * sum_x + sum_y * sum_y) as f64).sqrt() as i32;
    mag.clamp(0, 255) as u8
}

fn fits(gray: &GrayBuffer, size: usize) -> bool {
    gray.width() >= size && gray.height() >= size
}

/// Apply `operator` to `gray`, returning a new buffer of the same size
pub fn convolve(gray: &GrayBuffer, operator: Operator) -> GrayBuffer {
    let kernels = operator.kernels();
    let mut out = gray.clone();
    if !fits(gray, kernels.size) {
        warn!(
            "{}x{} image smaller than {operator} window {}, left unfiltered",
            gray.width(),
            gray.height(),
            kernels.size
        );
        return out;
    }

    let last_x = gray.width() - kernels.size;
    let last_y = gray.height() - kernels.size;
    for x in 0..=last_x {
        for y in 0..=last_y {
            out.set(x, y, window_magnitude(gray, &kernels, x, y));
        }
    }

    debug!(
        "convolved {}x{} with {operator}",
        gray.width(),
        gray.height()
    );
    out
}

/// Row-parallel variant of [`convolve`]; output is identical
pub fn convolve_parallel(gray: &GrayBuffer, operator: Operator) -> GrayBuffer {
    let kernels = operator.kernels();
    let mut out = gray.clone();
    if !fits(gray, kernels.size) {
        warn!(
            "{}x{} image smaller than {operator} window {}, left unfiltered",
            gray.width(),
            gray.height(),
            kernels.size
        );
        return out;
    }

    let width = gray.width();
    let last_x = width - kernels.size;
    let last_y = gray.height() - kernels.size;
    out.as_bytes_mut()
        .par_chunks_mut(width)
        .enumerate()
        .take(last_y + 1)
        .for_each(|(y, row)| {
            for (x, dst) in row.iter_mut().enumerate().take(last_x + 1) {
                *dst = window_magnitude(gray, &kernels, x, y);
            }
        });

    debug!(
        "convolved {}x{} with {operator} (parallel)",
        gray.width(),
        gray.height()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_edge() -> GrayBuffer {
        // 6x5, dark on the left, 200 from column 3
        let mut data = Vec::new();
        for _ in 0..5 {
            data.extend_from_slice(&[0, 0, 0, 200, 200, 200]);
        }
        GrayBuffer::from_raw(6, 5, data).unwrap()
    }

    #[test]
    fn test_sobel_origin_anchored() {
        let out = convolve(&step_edge(), Operator::Sobel);
        for y in 0..3 {
            assert_eq!(out.row(y), &[0, 255, 255, 0, 200, 200]);
        }
        // Bottom strip untouched
        assert_eq!(out.row(3), &[0, 0, 0, 200, 200, 200]);
        assert_eq!(out.row(4), &[0, 0, 0, 200, 200, 200]);
    }

    #[test]
    fn test_roberts_step_edge() {
        let out = convolve(&step_edge(), Operator::Roberts);
        for y in 0..4 {
            assert_eq!(out.row(y), &[0, 0, 255, 0, 0, 200]);
        }
        assert_eq!(out.row(4), &[0, 0, 0, 200, 200, 200]);
    }

    #[test]
    fn test_unclamped_magnitudes() {
        let gray = GrayBuffer::from_raw(3, 3, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]).unwrap();

        // gx = 80, gy = 240, sqrt(64000) = 252.98
        let sobel = convolve(&gray, Operator::Sobel);
        assert_eq!(sobel.as_bytes(), &[252, 20, 30, 40, 50, 60, 70, 80, 90]);

        // Each 2x2 window: gx = -40, gy = -20, sqrt(2000) = 44.7
        let roberts = convolve(&gray, Operator::Roberts);
        assert_eq!(roberts.as_bytes(), &[44, 44, 30, 44, 44, 60, 70, 80, 90]);
    }

    #[test]
    fn test_flat_input_has_zero_gradient() {
        for op in [Operator::Sobel, Operator::Prewitt] {
            for (w, h) in [(3, 3), (7, 4), (16, 9)] {
                let out = convolve(&GrayBuffer::new(w, h), op);
                assert!(out.as_bytes().iter().all(|&v| v == 0), "{op} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_saturated_gradient_clamps() {
        // Column 0 dark, the rest white: the first window sees the full
        // 0 -> 255 step (Sobel gx = 1020, Roberts |g| = 360)
        let mut step = GrayBuffer::filled(6, 4, 255);
        for y in 0..4 {
            step.set(0, y, 0);
        }
        for op in Operator::ALL {
            let out = convolve(&step, op);
            assert_eq!(out.get(0, 0), 255, "{op}");
            // Windows fully inside the white area have no gradient
            assert_eq!(out.get(2, 0), 0, "{op}");
        }
    }

    #[test]
    fn test_too_small_passes_through() {
        let gray = GrayBuffer::from_raw(2, 5, vec![9; 10]).unwrap();
        assert_eq!(convolve(&gray, Operator::Sobel), gray);
        assert_eq!(convolve_parallel(&gray, Operator::Prewitt), gray);

        let single = GrayBuffer::from_raw(1, 1, vec![42]).unwrap();
        assert_eq!(convolve(&single, Operator::Roberts), single);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..17 * 11).map(|i| (i * 53 % 256) as u8).collect();
        let gray = GrayBuffer::from_raw(17, 11, data).unwrap();
        for op in Operator::ALL {
            assert_eq!(convolve(&gray, op), convolve_parallel(&gray, op), "{op}");
        }
    }
}
