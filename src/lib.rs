//! edge_vector - raster edges to SVG line segments
//!
//! Reduces an image to gray, runs a small gradient operator (Sobel, Prewitt or
//! Roberts cross), thresholds the magnitude into a black/white mask and traces
//! straight runs of edge pixels into line segments that can be drawn or
//! exported as SVG.

/// Environment defaults for the pipeline configuration
pub mod config;
/// Crate error type
pub mod error;
/// Gradient operators and the convolution engine
pub mod filters;
/// Core data structures (Raster, GrayBuffer, Segment, BitMatrix)
pub mod models;
/// End-to-end pipeline
pub mod pipeline;
/// Segment preview rendering and SVG export
pub mod render;
/// Image loading and buffer statistics
pub mod tools;
/// Grayscale reduction and thresholding
pub mod utils;
/// Line tracing over binary masks
pub mod vectorize;

pub use error::{EdgeError, Result};
pub use filters::Operator;
pub use models::{Channels, GrayBuffer, Point, Raster, Segment, SegmentList};
pub use pipeline::{ExportStatus, PipelineConfig, PipelineResult, filter_raster, run_pipeline};
pub use render::{export_svg, render_segments, svg_document};
pub use utils::binarization::Threshold;
pub use vectorize::trace_segments;

use utils::grayscale::rgb_to_grayscale;

/// Trace edge segments in an RGB or RGBA raster
///
/// # Arguments
/// * `raster` - Source image
/// * `operator` - Gradient operator
/// * `threshold` - Cutoff applied to the gradient magnitude
///
/// # Returns
/// Segments in trace order
pub fn vectorize_image(raster: &Raster, operator: Operator, threshold: Threshold) -> SegmentList {
    // Step 1: Convert to grayscale
    let gray = rgb_to_grayscale(raster);

    // Step 2: Gradient magnitude
    let filtered = filters::convolve(&gray, operator);

    // Step 3: Binarize (no-op when the threshold is unset)
    let mask = threshold.apply(filtered);

    // Step 4: Trace
    trace_segments(&mask)
}
