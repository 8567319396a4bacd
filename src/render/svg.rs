//! SVG serialization of traced segments.
//!
//! The document is a bare `<svg>` root holding one `<line>` per segment, in
//! trace order, on a single line with no XML declaration and no viewBox.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{EdgeError, Result};
use crate::models::Segment;

const SVG_OPEN: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">";
const SVG_CLOSE: &str = "</svg>";

fn push_line(out: &mut String, segment: &Segment) {
    out.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"1\" />",
        segment.start.x, segment.start.y, segment.end.x, segment.end.y
    ));
}

/// Build the SVG document for `segments`
pub fn svg_document(segments: &[Segment]) -> String {
    let mut out = String::with_capacity(SVG_OPEN.len() + SVG_CLOSE.len() + segments.len() * 80);
    out.push_str(SVG_OPEN);
    for segment in segments {
        push_line(&mut out, segment);
    }
    out.push_str(SVG_CLOSE);
    out
}

/// Stream the SVG document for `segments` into `writer`
pub fn write_svg<W: Write>(segments: &[Segment], mut writer: W) -> io::Result<()> {
    writer.write_all(svg_document(segments).as_bytes())?;
    writer.flush()
}

/// Write the SVG document for `segments` to `path`
///
/// Errors carry the path. A failed write may leave a truncated file behind.
pub fn export_svg(segments: &[Segment], path: &Path) -> Result<()> {
    let io_err = |source: io::Error| EdgeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let document = svg_document(segments);
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    debug!("wrote {} segments to {}", segments.len(), path.display());
    Ok(())
}
