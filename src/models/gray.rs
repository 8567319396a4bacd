use image::GrayImage;

use crate::error::{EdgeError, Result};

/// Pure black intensity
pub const BLACK: u8 = 0;
/// Pure white intensity
pub const WHITE: u8 = 255;

/// Single-channel 8-bit intensity buffer, row-major
///
/// Also used for thresholded masks, where every value is either [`BLACK`] or
/// [`WHITE`] (see [`GrayBuffer::is_binary`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayBuffer {
    /// Create an all-black buffer
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Create a buffer with every pixel set to `value`
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap raw row-major intensities
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(EdgeError::BufferSize {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get buffer width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get buffer height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at (x, y); out-of-bounds reads as black
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return BLACK;
        }
        self.data[y * self.width + x]
    }

    /// Set intensity at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// One row of intensities
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Raw row-major intensities
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// True when every pixel is pure black or pure white
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == BLACK || v == WHITE)
    }

    /// Count of pure white pixels
    pub fn white_pixels(&self) -> usize {
        self.data.iter().filter(|&&v| v == WHITE).count()
    }

    /// Convert to an `image` grayscale image
    pub fn to_gray_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for (dst, &src) in img.iter_mut().zip(&self.data) {
            *dst = src;
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_buffer_access() {
        let mut buf = GrayBuffer::new(4, 3);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        buf.set(3, 2, 77);
        assert_eq!(buf.get(3, 2), 77);
        assert_eq!(buf.row(2), &[0, 0, 0, 77]);
        assert_eq!(buf.get(4, 0), BLACK);
        buf.set(10, 10, 1); // Should not panic
    }

    #[test]
    fn test_binary_detection() {
        let mut buf = GrayBuffer::filled(2, 2, WHITE);
        assert!(buf.is_binary());
        assert_eq!(buf.white_pixels(), 4);
        buf.set(1, 1, 128);
        assert!(!buf.is_binary());
    }

    #[test]
    fn test_to_gray_image() {
        let buf = GrayBuffer::from_raw(2, 1, vec![10, 200]).unwrap();
        let img = buf.to_gray_image();
        assert_eq!(img.get_pixel(0, 0).0, [10]);
        assert_eq!(img.get_pixel(1, 0).0, [200]);
    }
}
