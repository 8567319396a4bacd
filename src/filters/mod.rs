//! Gradient edge filters
//!
//! - Operator table (Sobel, Prewitt, Roberts cross)
//! - Origin-anchored windowed convolution producing gradient magnitude

/// Fixed kernel pairs per operator
pub mod operator;
/// Convolution engine
pub mod convolution;

pub use convolution::{convolve, convolve_parallel};
pub use operator::{KernelPair, Operator};
