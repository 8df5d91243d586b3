use std::io;
use std::mem;
use std::os::fd::RawFd;
use std::ptr::{self, NonNull};
use std::slice;

/// Move-only owner of one read-write memory mapping, viewed as packed
/// pixel words.
///
/// The region is mapped once at construction and unmapped exactly once on
/// drop, however many blits happen in between. No copies: the mapping is
/// the single handle to the device memory.
#[derive(Debug)]
pub struct Mapping {
    ptr: NonNull<u32>,
    len_bytes: usize,
}

impl Mapping {
    /// Shared mapping of the first `len_bytes` of the device.
    pub fn shared(fd: RawFd, len_bytes: usize) -> io::Result<Self> {
        // SAFETY: requests a fresh mapping at a kernel-chosen address; the
        // result is checked against MAP_FAILED before use.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len_bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        Self::from_raw(ptr, len_bytes)
    }

    /// Private anonymous mapping of the same shape, for exercising the
    /// word addressing and unmap discipline without a device.
    pub fn anonymous(len_bytes: usize) -> io::Result<Self> {
        // SAFETY: as above; MAP_ANONYMOUS ignores the fd.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len_bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        Self::from_raw(ptr, len_bytes)
    }

    fn from_raw(ptr: *mut libc::c_void, len_bytes: usize) -> io::Result<Self> {
        if ptr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: a successful mmap never returns null.
        let ptr = unsafe { NonNull::new_unchecked(ptr.cast::<u32>()) };
        Ok(Self { ptr, len_bytes })
    }

    /// Mapped length in pixel words.
    pub fn words(&self) -> usize {
        self.len_bytes / mem::size_of::<u32>()
    }

    pub fn as_slice(&self) -> &[u32] {
        // SAFETY: the region is mapped readable for self's lifetime and
        // mmap returns page-aligned addresses, so the u32 view is aligned.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.words()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        // SAFETY: as above, plus exclusive access through &mut self.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.words()) }
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // SAFETY: ptr and len are exactly what mmap returned, and drop
        // runs at most once.
        unsafe {
            libc::munmap(self.ptr.as_ptr().cast(), self.len_bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_mapping_round_trips_words() {
        let mut map = Mapping::anonymous(4096).unwrap();
        assert_eq!(map.words(), 1024);

        map.as_mut_slice()[0] = 0x00FF_0000;
        map.as_mut_slice()[1023] = 0x0000_00FF;

        assert_eq!(map.as_slice()[0], 0x00FF_0000);
        assert_eq!(map.as_slice()[1023], 0x0000_00FF);
    }

    #[test]
    fn mapping_starts_zeroed() {
        let map = Mapping::anonymous(4096).unwrap();
        assert!(map.as_slice().iter().all(|&word| word == 0));
    }
}
