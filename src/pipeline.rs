//! Synchronous edge-to-vector pipeline
//!
//! raster -> grayscale -> gradient filter -> threshold -> trace -> preview/SVG.
//! Every stage runs to completion before the next one starts and owns the
//! buffer it produces.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::RgbaImage;
use log::{debug, error};

use crate::config;
use crate::error::{EdgeError, Result};
use crate::filters::{Operator, convolve, convolve_parallel};
use crate::models::{GrayBuffer, Raster, SegmentList};
use crate::render::{export_svg, render_segments, svg_document};
use crate::utils::binarization::Threshold;
use crate::utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};
use crate::vectorize::trace_segments;

/// Immutable pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Gradient operator
    pub operator: Operator,
    /// Black and white cutoff applied after filtering
    pub threshold: Threshold,
    /// Where to write the SVG document, if anywhere
    pub output: Option<PathBuf>,
    /// Split grayscale, convolution and threshold across rows
    pub parallel: bool,
}

impl PipelineConfig {
    /// Config with `operator` and no threshold or output
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            ..Self::default()
        }
    }

    /// Defaults read from `EDGE_OPERATOR`, `EDGE_THRESHOLD` and `EDGE_PARALLEL`
    pub fn from_env() -> Self {
        Self {
            operator: config::default_operator(),
            threshold: config::default_threshold(),
            output: None,
            parallel: config::parallel_enabled(),
        }
    }

    /// Set the threshold
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the SVG output path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Enable or disable row-parallel stages
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Wall-clock time spent in each stage
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    /// Channel-average reduction
    pub grayscale: Duration,
    /// Gradient filter
    pub convolution: Duration,
    /// Black and white cutoff
    pub threshold: Duration,
    /// Segment tracing
    pub vectorize: Duration,
    /// Preview rasterization
    pub render: Duration,
    /// SVG write (zero when skipped)
    pub export: Duration,
}

impl StageTimings {
    /// Sum over all stages
    pub fn total(&self) -> Duration {
        self.grayscale + self.convolution + self.threshold + self.vectorize + self.render + self.export
    }
}

/// Outcome of the export stage
#[derive(Debug)]
pub enum ExportStatus {
    /// No output path configured
    Skipped,
    /// Document written to this path
    Written(PathBuf),
    /// Writing failed; all other results are still valid
    Failed(EdgeError),
}

impl ExportStatus {
    /// True when the document was written
    pub fn is_written(&self) -> bool {
        matches!(self, ExportStatus::Written(_))
    }
}

/// Everything the pipeline produced
#[derive(Debug)]
pub struct PipelineResult {
    /// Gradient magnitude buffer
    pub filtered: GrayBuffer,
    /// Thresholded mask (equal to `filtered` when no threshold is set)
    pub mask: GrayBuffer,
    /// Traced segments, in trace order
    pub segments: SegmentList,
    /// Transparent canvas with every segment drawn in black
    pub preview: RgbaImage,
    /// Export outcome
    pub export: ExportStatus,
    /// Per-stage timings
    pub timings: StageTimings,
}

impl PipelineResult {
    /// SVG document for the traced segments
    pub fn svg(&self) -> String {
        svg_document(&self.segments)
    }

    /// Write the SVG document to `path`; retrying after a failed export is fine
    pub fn export_to(&self, path: &Path) -> Result<()> {
        export_svg(&self.segments, path)
    }
}

/// Grayscale reduction followed by the gradient filter
pub fn filter_raster(raster: &Raster, operator: Operator, parallel: bool) -> GrayBuffer {
    if parallel {
        convolve_parallel(&rgb_to_grayscale_parallel(raster), operator)
    } else {
        convolve(&rgb_to_grayscale(raster), operator)
    }
}

/// Run every stage on `raster`
///
/// Never fails: an export error is reported in [`PipelineResult::export`]
/// and leaves the other results intact.
pub fn run_pipeline(raster: &Raster, config: &PipelineConfig) -> PipelineResult {
    let mut timings = StageTimings::default();
    debug!(
        "pipeline start: {}x{} operator={} threshold={:?} parallel={}",
        raster.width(),
        raster.height(),
        config.operator,
        config.threshold.value(),
        config.parallel
    );

    let start = Instant::now();
    let gray = if config.parallel {
        rgb_to_grayscale_parallel(raster)
    } else {
        rgb_to_grayscale(raster)
    };
    timings.grayscale = start.elapsed();

    let start = Instant::now();
    let filtered = if config.parallel {
        convolve_parallel(&gray, config.operator)
    } else {
        convolve(&gray, config.operator)
    };
    drop(gray);
    timings.convolution = start.elapsed();

    let start = Instant::now();
    let mask = if config.parallel {
        config.threshold.apply_parallel(filtered.clone())
    } else {
        config.threshold.apply(filtered.clone())
    };
    timings.threshold = start.elapsed();

    let start = Instant::now();
    let segments = trace_segments(&mask);
    timings.vectorize = start.elapsed();

    let start = Instant::now();
    let preview = render_segments(&segments, raster.width() as u32, raster.height() as u32);
    timings.render = start.elapsed();

    let start = Instant::now();
    let export = match &config.output {
        None => ExportStatus::Skipped,
        Some(path) => match export_svg(&segments, path) {
            Ok(()) => ExportStatus::Written(path.clone()),
            Err(err) => {
                error!("SVG export failed: {err}");
                ExportStatus::Failed(err)
            }
        },
    };
    timings.export = start.elapsed();

    debug!(
        "pipeline done: {} segments in {:.3} ms",
        segments.len(),
        timings.total().as_secs_f64() * 1000.0
    );

    PipelineResult {
        filtered,
        mask,
        segments,
        preview,
        export,
        timings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channels;

    fn square_raster() -> Raster {
        // 8x8 black with a white 4x4 block at (2,2)
        let mut raster = Raster::filled(8, 8, Channels::Rgb, [0, 0, 0, 255]);
        for y in 2..6 {
            for x in 2..6 {
                raster.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        raster
    }

    #[test]
    fn test_unset_threshold_keeps_filtered() {
        let result = run_pipeline(&square_raster(), &PipelineConfig::new(Operator::Sobel));
        assert_eq!(result.mask, result.filtered);
        assert!(matches!(result.export, ExportStatus::Skipped));
    }

    #[test]
    fn test_thresholded_mask_is_binary() {
        let config = PipelineConfig::new(Operator::Prewitt).with_threshold(Threshold::new(100));
        let result = run_pipeline(&square_raster(), &config);
        assert!(result.mask.is_binary());
        assert!(!result.segments.is_empty());
        assert_eq!(result.preview.dimensions(), (8, 8));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for op in Operator::ALL {
            let config = PipelineConfig::new(op).with_threshold(Threshold::new(60));
            let seq = run_pipeline(&square_raster(), &config);
            let par = run_pipeline(&square_raster(), &config.clone().with_parallel(true));
            assert_eq!(seq.filtered, par.filtered);
            assert_eq!(seq.segments, par.segments);
        }
    }

    #[test]
    fn test_filter_raster() {
        let filtered = filter_raster(&square_raster(), Operator::Roberts, false);
        // Window at (1,1) straddles the block corner: gx = -255, gy = 0
        assert_eq!(filtered.get(1, 1), 255);
        assert_eq!(filtered.get(3, 3), 0);
    }

    #[test]
    fn test_result_svg() {
        let config = PipelineConfig::new(Operator::Sobel).with_threshold(Threshold::new(254));
        let result = run_pipeline(&square_raster(), &config);
        assert_eq!(result.svg().matches("<line ").count(), result.segments.len());
    }
}
