use std::path::PathBuf;

use thiserror::Error;

/// Main error type for edge_vector operations
#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("IO error with {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error with {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("image must be at least 1x1, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("unknown operator '{0}' (expected sobel, prewitt or roberts)")]
    UnknownOperator(String),
}

pub type Result<T> = std::result::Result<T, EdgeError>;
