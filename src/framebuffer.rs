use std::io;
use std::mem;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::debug;

use crate::compose::{self, Geometry, BYTES_PER_PIXEL};
use crate::fd::DeviceFd;
use crate::image::Image;
use crate::mapping::Mapping;
use crate::math::{Rgb888, SurfacePoint};

const CURSOR_BLINK: &str = "/sys/class/graphics/fbcon/cursor_blink";

/// The memory-mapped display surface.
///
/// Owns the device mapping for its whole lifetime. The hardware controller
/// scans the mapped words out directly, so a write is also the "present" —
/// there is no flush step. Callers serialize access themselves: this is a
/// single-threaded draw loop component.
pub struct FrameBuffer {
    geometry: Geometry,
    map: Mapping,
}

impl FrameBuffer {
    /// Opens the device, queries its geometry and maps the whole buffer.
    /// Fails all-or-nothing; the error names the step that failed and
    /// carries the OS error code.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let fd = DeviceFd::open(path)?;

        // SAFETY: each ioctl writes one fixed-size struct we own and is
        // checked for failure before the struct is read.
        let mut finfo: crate::fbdev::fb_fix_screeninfo = unsafe { mem::zeroed() };
        let rc = unsafe {
            libc::ioctl(
                fd.raw(),
                crate::fbdev::FBIOGET_FSCREENINFO as _,
                &mut finfo as *mut crate::fbdev::fb_fix_screeninfo,
            )
        };
        if rc == -1 {
            return Err(io::Error::last_os_error())
                .context("reading fixed framebuffer information");
        }

        let mut vinfo: crate::fbdev::fb_var_screeninfo = unsafe { mem::zeroed() };
        let rc = unsafe {
            libc::ioctl(
                fd.raw(),
                crate::fbdev::FBIOGET_VSCREENINFO as _,
                &mut vinfo as *mut crate::fbdev::fb_var_screeninfo,
            )
        };
        if rc == -1 {
            return Err(io::Error::last_os_error())
                .context("reading variable framebuffer information");
        }

        ensure!(
            vinfo.bits_per_pixel == 32,
            "{} reports {} bits per pixel, the engine needs 32",
            path.display(),
            vinfo.bits_per_pixel
        );

        let geometry = Geometry {
            xres: vinfo.xres,
            yres: vinfo.yres,
            line_length_pixels: finfo.line_length / BYTES_PER_PIXEL as u32,
        };

        let map = Mapping::shared(fd.raw(), finfo.smem_len as usize)
            .context("mapping framebuffer device to memory")?;

        debug!(
            "mapped {}: {}x{} native, stride {} px, {} bytes",
            path.display(),
            vinfo.xres,
            vinfo.yres,
            geometry.line_length_pixels,
            finfo.smem_len
        );

        Ok(Self { geometry, map })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Logical width: the device's vertical resolution (rotated mount).
    pub fn width(&self) -> i32 {
        self.geometry.width()
    }

    /// Logical height: the device's horizontal resolution (rotated mount).
    pub fn height(&self) -> i32 {
        self.geometry.height()
    }

    /// Fills the whole mapped region with one color in a single linear
    /// pass, no per-pixel addressing.
    pub fn clear(&mut self, rgb: impl Into<u32>) {
        let rgb = rgb.into();
        self.map.as_mut_slice().fill(rgb);
    }

    /// Bounds-checked single-pixel write through the rotated transform.
    pub fn set_pixel(&mut self, p: SurfacePoint, rgb: impl Into<u32>) -> bool {
        compose::write_pixel(self.map.as_mut_slice(), &self.geometry, p, rgb.into())
    }

    pub fn get_pixel(&self, p: SurfacePoint) -> Option<u32> {
        compose::read_pixel(self.map.as_slice(), &self.geometry, p)
    }

    pub fn get_pixel_rgb(&self, p: SurfacePoint) -> Option<Rgb888> {
        self.get_pixel(p).map(Rgb888::from_packed)
    }

    /// Composites the image's current frame onto the surface. Placement
    /// and clipping rules are those of [`compose::blit`].
    pub fn put_image(&mut self, p: SurfacePoint, image: &Image) -> bool {
        compose::blit(self.map.as_mut_slice(), &self.geometry, p, image)
    }

    /// Turns the console cursor blink on or off so it doesn't draw over
    /// the surface. Best effort: false when the fbcon sysfs node is not
    /// available.
    pub fn cursor(&self, on: bool) -> bool {
        std::fs::write(CURSOR_BLINK, if on { "1" } else { "0" }).is_ok()
    }
}
