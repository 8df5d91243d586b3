//! Pure compositing core: the rotated addressing transform and the clipped
//! column-wise blit, expressed over plain word slices so every property can
//! be exercised without a mapped device.

use crate::image::Image;
use crate::math::SurfacePoint;

/// Bytes per packed pixel word.
pub const BYTES_PER_PIXEL: usize = 4;

/// Device-reported screen geometry.
///
/// The panel is mounted rotated 90 degrees from the device's native scan
/// order: callers see a logical width equal to the device's vertical
/// resolution and a logical height equal to its horizontal resolution.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    /// Native horizontal resolution reported by the device.
    pub xres: u32,
    /// Native vertical resolution reported by the device.
    pub yres: u32,
    /// Pixels in one hardware scan row, including any padding.
    pub line_length_pixels: u32,
}

impl Geometry {
    /// Logical width seen by callers.
    pub fn width(&self) -> i32 {
        self.yres as i32
    }

    /// Logical height seen by callers.
    pub fn height(&self) -> i32 {
        self.xres as i32
    }

    pub fn contains(&self, p: SurfacePoint) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width() && p.y < self.height()
    }

    /// Word offset of logical (x, y) in the device's native scan order.
    ///
    /// Logical x runs along the panel's long axis, which the device stores
    /// as successive scan rows counting down from the last; logical y runs
    /// along one scan row. Callers must have bounds-checked `p` first.
    pub fn offset(&self, p: SurfacePoint) -> usize {
        p.y as usize + (self.yres as usize - 1 - p.x as usize) * self.line_length_pixels as usize
    }

    /// Words covered by the visible resolution. A surface slice must be at
    /// least this long; `smem_len` usually maps more.
    pub fn words(&self) -> usize {
        self.yres as usize * self.line_length_pixels as usize
    }
}

/// Writes one pixel if the point lies on the surface, reporting whether
/// the write happened.
pub fn write_pixel(dst: &mut [u32], geo: &Geometry, p: SurfacePoint, rgb: u32) -> bool {
    let valid = geo.contains(p);
    if valid {
        dst[geo.offset(p)] = rgb;
    }
    valid
}

/// Reads one pixel, or None off the surface.
pub fn read_pixel(src: &[u32], geo: &Geometry, p: SurfacePoint) -> Option<u32> {
    if geo.contains(p) {
        Some(src[geo.offset(p)])
    } else {
        None
    }
}

/// Copies the image's current frame onto the surface with `origin` as the
/// requested position.
///
/// The effective destination x-origin is `width - image.width - origin.x`:
/// the panel mounting flips the logical width axis relative to the device
/// scan direction, and images must land where single-pixel writes land.
/// The y axis is not mirrored. This is a hardware orientation correction,
/// not a generic placement API.
///
/// When the whole footprint fits the device bounds, each source column is
/// copied as one contiguous run with no per-pixel branch. Otherwise the
/// copy is clipped; returns false when clipping leaves nothing to copy,
/// with the surface untouched.
pub fn blit(dst: &mut [u32], geo: &Geometry, origin: SurfacePoint, image: &Image) -> bool {
    let width = i32::from(image.width());
    let height = i32::from(image.height());
    let p = SurfacePoint::new(geo.width() - width - origin.x, origin.y);

    if p.x < 0
        || p.x + width > geo.yres as i32
        || p.y < 0
        || p.y + height > geo.xres as i32
    {
        return blit_clipped(dst, geo, p, image);
    }

    let stride = geo.line_length_pixels as usize;
    for i in 0..width {
        let column = image.column(i as i16);
        let start = (i + p.x) as usize * stride + p.y as usize;
        dst[start..start + column.len()].copy_from_slice(column);
    }

    true
}

/// Clipped path: trims source and destination to the overlap of the
/// mirrored footprint and the device bounds, one inclusive index span per
/// axis, then copies the reduced column ranges exactly like the fast path.
fn blit_clipped(dst: &mut [u32], geo: &Geometry, p: SurfacePoint, image: &Image) -> bool {
    let width = i32::from(image.width());
    let height = i32::from(image.height());

    let mut x_start: i32 = 0;
    let mut x_end = width - 1;

    let mut y_start: i32 = 0;
    let mut y_end = height - 1;

    if p.x < 0 {
        x_start = -p.x;
    }

    if p.x + width > geo.yres as i32 {
        x_end = geo.yres as i32 - 1 - p.x;
    }

    if p.y < 0 {
        y_start = -p.y;
    }

    if p.y + height > geo.xres as i32 {
        y_end = geo.xres as i32 - 1 - p.y;
    }

    if x_end - x_start <= 0 {
        return false;
    }

    if y_end - y_start <= 0 {
        return false;
    }

    let stride = geo.line_length_pixels as usize;
    let rows = (y_end - y_start + 1) as usize;

    for i in x_start..=x_end {
        let column = &image.column(i as i16)[y_start as usize..y_start as usize + rows];
        let start = (i + p.x) as usize * stride + (y_start + p.y) as usize;
        dst[start..start + rows].copy_from_slice(column);
    }

    true
}
