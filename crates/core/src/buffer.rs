//! RGBA pixel buffer

use crate::error::{Error, Result};

/// An RGBA8 raster in row-major order, suitable for handing to a canvas,
/// GPU texture upload, or PNG encoder.
///
/// The compositor owns a `PixelBuffer` exclusively for the duration of one
/// pipeline run; the host only ever sees it by reference after the run
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    ///
    /// Fails with [`Error::EmptySurface`] when either dimension is zero —
    /// a redraw cannot proceed without an output surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptySurface { width, height });
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// Alpha channel at `(x, y)`; out-of-bounds reads as 0.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[self.offset(x, y) + 3]
    }

    /// RGBA at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let o = self.offset(x, y);
        Ok([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Write RGBA at `(x, y)`; out-of-bounds writes are dropped.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable rows of `width * 4` bytes each.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.width * 4)
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Count of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent() {
        let buf = PixelBuffer::new(4, 3).unwrap();
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.covered_pixels(), 0);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_area_is_fatal() {
        assert!(matches!(
            PixelBuffer::new(0, 10),
            Err(Error::EmptySurface { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(10, 0),
            Err(Error::EmptySurface { .. })
        ));
    }

    #[test]
    fn put_and_read_pixel() {
        let mut buf = PixelBuffer::new(8, 8).unwrap();
        buf.put_pixel(3, 5, [10, 20, 30, 200]);
        assert_eq!(buf.pixel(3, 5).unwrap(), [10, 20, 30, 200]);
        assert_eq!(buf.alpha(3, 5), 200);
        assert_eq!(buf.covered_pixels(), 1);
    }

    #[test]
    fn out_of_bounds_write_is_dropped() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.put_pixel(5, 5, [255; 4]);
        assert_eq!(buf.covered_pixels(), 0);
        assert!(buf.pixel(5, 5).is_err());
    }
}
