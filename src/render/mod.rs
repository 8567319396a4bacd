//! Output of traced segments: raster preview and SVG document

pub mod preview;
pub mod svg;

pub use preview::{render_segments, write_png};
pub use svg::{export_svg, svg_document, write_svg};
