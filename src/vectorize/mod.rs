//! Binary mask to line segments
//!
//! Greedy directional tracing over a thresholded edge mask. The scan consumes
//! pixels as it goes, so it is inherently sequential.

pub mod tracer;

pub use tracer::{Direction, trace_segments};
