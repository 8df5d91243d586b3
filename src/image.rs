use anyhow::{anyhow, ensure, Result};

use crate::math::{ImagePoint, Rgb888};

/// Off-screen pixel buffer holding one or more equally sized frames.
///
/// Pixels are packed RGB words stored column-major within each frame, so a
/// single column is one contiguous run. The display surface's blit relies
/// on that layout to copy whole columns at a time.
///
/// Pixel accesses outside `[0, width) x [0, height)` are ignored and
/// reported through the return value, never an error: drawing code
/// routinely computes coordinates that fall off the buffer.
#[derive(Clone)]
pub struct Image {
    width: i16,
    height: i16,
    frame: u8,
    frames: u8,
    buffer: Vec<u32>,
}

impl Image {
    /// Creates a zero-filled (black) image of `frames` layers.
    pub fn new(width: i16, height: i16, frames: u8) -> Result<Self> {
        let len = buffer_len(width, height, frames)?;
        Ok(Self {
            width,
            height,
            frame: 0,
            frames,
            buffer: vec![0; len],
        })
    }

    /// Creates an image seeded from a flat pixel array in the image's
    /// storage order. The length must be exactly `width * height * frames`.
    pub fn from_pixels(width: i16, height: i16, frames: u8, pixels: Vec<u32>) -> Result<Self> {
        let len = buffer_len(width, height, frames)?;
        ensure!(
            pixels.len() == len,
            "pixel buffer holds {} words, {}x{}x{} needs {}",
            pixels.len(),
            width,
            height,
            frames,
            len
        );
        Ok(Self {
            width,
            height,
            frame: 0,
            frames,
            buffer: pixels,
        })
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn frame_count(&self) -> u8 {
        self.frames
    }

    /// Selects the frame addressed by subsequent pixel operations.
    /// Returns false (selector unchanged) for an out-of-range frame.
    pub fn set_frame(&mut self, frame: u8) -> bool {
        let valid = frame < self.frames;
        if valid {
            self.frame = frame;
        }
        valid
    }

    /// Overwrites every pixel of the current frame.
    pub fn clear(&mut self, rgb: impl Into<u32>) {
        let rgb = rgb.into();
        let base = self.frame_base();
        let len = self.frame_len();
        self.buffer[base..base + len].fill(rgb);
    }

    /// Writes a pixel of the current frame. Returns whether the point was
    /// inside the buffer and the write happened.
    pub fn set_pixel(&mut self, p: ImagePoint, rgb: impl Into<u32>) -> bool {
        match self.offset(p) {
            Some(index) => {
                self.buffer[index] = rgb.into();
                true
            }
            None => false,
        }
    }

    /// Reads a pixel of the current frame, or None outside the buffer.
    pub fn get_pixel(&self, p: ImagePoint) -> Option<u32> {
        self.offset(p).map(|index| self.buffer[index])
    }

    pub fn get_pixel_rgb(&self, p: ImagePoint) -> Option<Rgb888> {
        self.get_pixel(p).map(Rgb888::from_packed)
    }

    /// One column of the current frame as a contiguous run of `height`
    /// words.
    ///
    /// Panics when `x` is outside `0..width`, like slice indexing; the
    /// blit only asks for columns it has already clipped into range.
    pub fn column(&self, x: i16) -> &[u32] {
        assert!(
            x >= 0 && x < self.width,
            "column {x} outside image width {}",
            self.width
        );
        let start = self.frame_base() + x as usize * self.height as usize;
        &self.buffer[start..start + self.height as usize]
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn frame_base(&self) -> usize {
        self.frame as usize * self.frame_len()
    }

    fn offset(&self, p: ImagePoint) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(self.frame_base() + p.x as usize * self.height as usize + p.y as usize)
    }
}

fn buffer_len(width: i16, height: i16, frames: u8) -> Result<usize> {
    ensure!(
        width >= 0 && height >= 0,
        "image dimensions {width}x{height} are negative"
    );
    ensure!(frames > 0, "image needs at least one frame");
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(frames as usize))
        .ok_or_else(|| anyhow!("image size {width}x{height}x{frames} overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_contiguous() {
        let mut image = Image::new(4, 3, 1).unwrap();
        for x in 0..4i16 {
            for y in 0..3i16 {
                image.set_pixel(ImagePoint::new(x, y), (x as u32) << 8 | y as u32);
            }
        }

        let column = image.column(2);
        assert_eq!(column, &[0x200, 0x201, 0x202]);
    }

    #[test]
    fn clear_touches_only_current_frame() {
        let mut image = Image::new(2, 2, 3).unwrap();
        assert!(image.set_frame(1));
        image.clear(0xABCDEFu32);

        for frame in 0..3 {
            assert!(image.set_frame(frame));
            let expected = if frame == 1 { 0xABCDEF } else { 0 };
            assert_eq!(image.get_pixel(ImagePoint::new(0, 0)), Some(expected));
            assert_eq!(image.get_pixel(ImagePoint::new(1, 1)), Some(expected));
        }
    }

    #[test]
    fn frame_selector_rejects_out_of_range() {
        let mut image = Image::new(2, 2, 2).unwrap();
        assert!(!image.set_frame(2));
        assert_eq!(image.frame(), 0);
    }

    #[test]
    fn construction_rejects_bad_dimensions() {
        assert!(Image::new(-1, 4, 1).is_err());
        assert!(Image::new(4, -1, 1).is_err());
        assert!(Image::new(4, 4, 0).is_err());
        assert!(Image::from_pixels(2, 2, 1, vec![0; 3]).is_err());
    }
}
