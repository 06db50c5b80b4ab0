//! The soft circular coverage stamp.

use heatfield_core::PixelBuffer;

/// A square alpha mask holding a feathered filled circle.
///
/// Side length is `2 × (radius + blur)`: fully opaque out to `radius`,
/// fading linearly to transparent across the `blur` annulus. Painting it
/// marks pixels eligible for interpolation; everything it never touches
/// stays fully transparent. Built once per radius/blur configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStamp {
    radius: f64,
    blur: f64,
    side: usize,
    alpha: Vec<u8>,
}

impl CircleStamp {
    pub fn new(radius: f64, blur: f64) -> Self {
        let extent = radius + blur;
        let side = (2.0 * extent).ceil() as usize;
        let center = side as f64 / 2.0;

        let mut alpha = vec![0u8; side * side];
        for j in 0..side {
            for i in 0..side {
                // Sample at the pixel center.
                let dx = i as f64 + 0.5 - center;
                let dy = j as f64 + 0.5 - center;
                let d = (dx * dx + dy * dy).sqrt();

                let coverage = if d <= radius {
                    1.0
                } else if d >= extent || blur == 0.0 {
                    0.0
                } else {
                    1.0 - (d - radius) / blur
                };
                alpha[j * side + i] = (coverage * 255.0).round() as u8;
            }
        }

        Self {
            radius,
            blur,
            side,
            alpha,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }

    /// Distance from stamp center to its square edge.
    pub fn extent(&self) -> f64 {
        self.radius + self.blur
    }

    /// Side length of the mask in pixels.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Mask alpha at mask coordinates `(i, j)`.
    pub fn alpha_at(&self, i: usize, j: usize) -> u8 {
        if i >= self.side || j >= self.side {
            return 0;
        }
        self.alpha[j * self.side + i]
    }

    /// Composite the mask onto the buffer's alpha channel, centered at
    /// `(cx, cy)`, with source-over accumulation. RGB channels are left
    /// untouched; the interpolation pass fills them later.
    pub fn paint(&self, buf: &mut PixelBuffer, cx: f64, cy: f64) {
        let width = buf.width();
        let height = buf.height();
        let left = (cx - self.extent()).round() as i64;
        let top = (cy - self.extent()).round() as i64;

        let data = buf.data_mut();
        for j in 0..self.side {
            let y = top + j as i64;
            if y < 0 || y >= height as i64 {
                continue;
            }
            for i in 0..self.side {
                let x = left + i as i64;
                if x < 0 || x >= width as i64 {
                    continue;
                }
                let src = self.alpha[j * self.side + i] as u32;
                if src == 0 {
                    continue;
                }
                let o = (y as usize * width + x as usize) * 4 + 3;
                let dst = data[o] as u32;
                data[o] = (src + dst * (255 - src) / 255) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_length_covers_radius_plus_blur() {
        let stamp = CircleStamp::new(32.0, 32.0);
        assert_eq!(stamp.side(), 128);
        assert_eq!(stamp.extent(), 64.0);
    }

    #[test]
    fn center_is_opaque_corner_is_transparent() {
        let stamp = CircleStamp::new(16.0, 8.0);
        let mid = stamp.side() / 2;
        assert_eq!(stamp.alpha_at(mid, mid), 255);
        assert_eq!(stamp.alpha_at(0, 0), 0);
        assert_eq!(stamp.alpha_at(stamp.side() - 1, stamp.side() - 1), 0);
    }

    #[test]
    fn alpha_falls_off_monotonically_along_axis() {
        let stamp = CircleStamp::new(16.0, 16.0);
        let mid = stamp.side() / 2;
        let mut last = 255;
        for i in mid..stamp.side() {
            let a = stamp.alpha_at(i, mid);
            assert!(a <= last, "alpha rose from {last} to {a} at {i}");
            last = a;
        }
        // The rim pixel is nearly transparent; one past the mask is fully so.
        assert!(last < 16, "rim alpha {last}");
        assert_eq!(stamp.alpha_at(stamp.side(), mid), 0);
    }

    #[test]
    fn zero_blur_is_a_hard_disc() {
        let stamp = CircleStamp::new(8.0, 0.0);
        let mid = stamp.side() / 2;
        assert_eq!(stamp.alpha_at(mid, mid), 255);
        // One pixel inside vs. one outside the rim.
        assert_eq!(stamp.alpha_at(mid + 7, mid), 255);
        assert_eq!(stamp.alpha_at(mid + 8, mid), 0);
    }

    #[test]
    fn paint_marks_only_the_footprint() {
        let stamp = CircleStamp::new(4.0, 2.0);
        let mut buf = PixelBuffer::new(40, 40).unwrap();
        stamp.paint(&mut buf, 20.0, 20.0);

        assert_eq!(buf.alpha(20, 20), 255);
        // Outside the 6px extent nothing is covered.
        assert_eq!(buf.alpha(20, 28), 0);
        assert_eq!(buf.alpha(0, 0), 0);
        assert!(buf.covered_pixels() > 0);
    }

    #[test]
    fn paint_clips_at_buffer_edges() {
        let stamp = CircleStamp::new(8.0, 4.0);
        let mut buf = PixelBuffer::new(16, 16).unwrap();
        stamp.paint(&mut buf, 0.0, 0.0);
        stamp.paint(&mut buf, 15.0, 15.0);
        assert!(buf.covered_pixels() > 0);
    }

    #[test]
    fn overlapping_stamps_accumulate_alpha() {
        let stamp = CircleStamp::new(4.0, 8.0);
        let mut once = PixelBuffer::new(64, 64).unwrap();
        let mut twice = PixelBuffer::new(64, 64).unwrap();
        stamp.paint(&mut once, 28.0, 32.0);
        stamp.paint(&mut twice, 28.0, 32.0);
        stamp.paint(&mut twice, 36.0, 32.0);
        // Between the two centers, accumulated coverage exceeds a single
        // stamp's contribution.
        assert!(twice.alpha(32, 32) >= once.alpha(32, 32));
        assert!(twice.covered_pixels() > once.covered_pixels());
    }
}
