use log::warn;
use rayon::prelude::*;

use crate::models::{BLACK, GrayBuffer, WHITE};

/// Black and white cutoff; unset means thresholding is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Threshold(Option<u8>);

impl Threshold {
    /// A threshold at `value`
    pub fn new(value: u8) -> Self {
        Self(Some(value))
    }

    /// No thresholding
    pub fn unset() -> Self {
        Self(None)
    }

    /// Normalize an untyped value: anything outside [0, 255] becomes unset
    pub fn from_raw(value: i32) -> Self {
        match u8::try_from(value) {
            Ok(v) => Self(Some(v)),
            Err(_) => {
                warn!("threshold {value} outside 0..=255, thresholding disabled");
                Self(None)
            }
        }
    }

    /// Cutoff value, if set
    pub fn value(&self) -> Option<u8> {
        self.0
    }

    /// Whether a cutoff is set
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Binarize `gray`, or hand it back untouched when unset
    pub fn apply(&self, gray: GrayBuffer) -> GrayBuffer {
        match self.0 {
            Some(t) => threshold_binarize(&gray, t),
            None => gray,
        }
    }

    /// Row-parallel variant of [`Threshold::apply`]
    pub fn apply_parallel(&self, gray: GrayBuffer) -> GrayBuffer {
        match self.0 {
            Some(t) => threshold_binarize_parallel(&gray, t),
            None => gray,
        }
    }
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Option<u8>> for Threshold {
    fn from(value: Option<u8>) -> Self {
        Self(value)
    }
}

#[inline]
fn binarize_pixel(v: u8, threshold: u8) -> u8 {
    // Strictly greater: a pixel equal to the threshold is black
    if v > threshold { WHITE } else { BLACK }
}

/// Simple global threshold binarization
///
/// Pixels brighter than `threshold` become white, all others black.
pub fn threshold_binarize(gray: &GrayBuffer, threshold: u8) -> GrayBuffer {
    let mut binary = GrayBuffer::new(gray.width(), gray.height());
    for (dst, &src) in binary.as_bytes_mut().iter_mut().zip(gray.as_bytes()) {
        *dst = binarize_pixel(src, threshold);
    }
    binary
}

/// Threshold binarization with rows processed in parallel
pub fn threshold_binarize_parallel(gray: &GrayBuffer, threshold: u8) -> GrayBuffer {
    let width = gray.width();
    let mut binary = GrayBuffer::new(width, gray.height());
    if width == 0 {
        return binary;
    }

    binary
        .as_bytes_mut()
        .par_chunks_mut(width)
        .zip(gray.as_bytes().par_chunks(width))
        .for_each(|(dst, src)| {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = binarize_pixel(s, threshold);
            }
        });

    binary
}
