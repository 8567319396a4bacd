pub mod gray;
pub mod matrix;
pub mod raster;
pub mod segment;

pub use gray::{BLACK, GrayBuffer, WHITE};
pub use matrix::BitMatrix;
pub use raster::{Channels, Raster};
pub use segment::{Point, Segment, SegmentList};
