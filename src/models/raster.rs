use crate::error::{EdgeError, Result};

/// Pixel layout of a [`Raster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// 3 bytes per pixel: red, green, blue
    Rgb,
    /// 4 bytes per pixel: red, green, blue, alpha
    Rgba,
}

impl Channels {
    /// Bytes per pixel
    pub fn count(&self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Whether the layout carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// Interleaved 8-bit color raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap raw interleaved bytes, validating the buffer shape
    pub fn from_raw(width: usize, height: usize, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EdgeError::EmptyImage { width, height });
        }
        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(EdgeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a raster filled with a single color (alpha is ignored for RGB)
    pub fn filled(width: usize, height: usize, channels: Channels, pixel: [u8; 4]) -> Self {
        let n = channels.count();
        let mut data = Vec::with_capacity(width * height * n);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel[..n]);
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Get raster width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get raster height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the pixel layout
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (x, y) as RGBA; RGB rasters report alpha 255
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let idx = (y * self.width + x) * n;
        let px = &self.data[idx..idx + n];
        let alpha = if self.channels.has_alpha() { px[3] } else { 255 };
        Some([px[0], px[1], px[2], alpha])
    }

    /// Overwrite the pixel at (x, y); out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let n = self.channels.count();
        let idx = (y * self.width + x) * n;
        self.data[idx..idx + n].copy_from_slice(&rgba[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_shape() {
        assert!(Raster::from_raw(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
        assert!(matches!(
            Raster::from_raw(2, 2, Channels::Rgba, vec![0; 12]),
            Err(EdgeError::BufferSize {
                expected: 16,
                actual: 12
            })
        ));
        assert!(matches!(
            Raster::from_raw(0, 3, Channels::Rgb, Vec::new()),
            Err(EdgeError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_pixel_access() {
        let mut raster = Raster::filled(3, 2, Channels::Rgb, [1, 2, 3, 0]);
        assert_eq!(raster.pixel(2, 1), Some([1, 2, 3, 255]));
        raster.set_pixel(0, 1, [9, 8, 7, 6]);
        assert_eq!(raster.pixel(0, 1), Some([9, 8, 7, 255]));
        assert_eq!(raster.pixel(3, 0), None);
        raster.set_pixel(5, 5, [0, 0, 0, 0]); // Should not panic
    }
}
