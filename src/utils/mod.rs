//! Per-pixel stages ahead of and after the gradient filter
//!
//! - Grayscale reduction (RGB/RGBA to channel average)
//! - Binarization (single global cutoff)

pub mod binarization;
pub mod grayscale;
