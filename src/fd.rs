use std::fs::{File, OpenOptions};
use std::os::fd::{AsRawFd, RawFd};
use std::path::Path;

use anyhow::{Context, Result};

/// Scoped ownership of an opened device node.
///
/// The descriptor closes exactly once when the wrapper drops. The raw fd
/// is handed out only for the ioctl/mmap calls during surface
/// construction; the mapping outlives the descriptor.
#[derive(Debug)]
pub struct DeviceFd {
    file: File,
}

impl DeviceFd {
    /// Opens the device read-write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("cannot open framebuffer device {}", path.display()))?;
        Ok(Self { file })
    }

    pub fn raw(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
