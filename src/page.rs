use std::{io, ptr::{self, NonNull}};

use crate::{
  config,
  error::{AllocError, Result},
};

/// Provider of whole-page memory mappings.
pub trait PageSource {
  /// Smallest unit the source can map; heap page sizes must be a multiple.
  fn granularity(&self) -> usize;

  /// Maps `bytes` of zeroed, read/write memory. `bytes` is a multiple of the
  /// heap page size.
  fn map(
    &mut self,
    bytes: usize,
  ) -> Result<NonNull<u8>>;

  /// Returns a mapping to the source.
  ///
  /// # Safety
  ///
  /// `ptr` and `bytes` must describe exactly one range previously returned by
  /// [`PageSource::map`] on this source, and nothing may use it afterwards.
  unsafe fn unmap(
    &mut self,
    ptr: NonNull<u8>,
    bytes: usize,
  ) -> Result<()>;
}

/// Private anonymous mappings straight from the kernel.
#[derive(Debug, Default, Clone, Copy)]
pub struct MmapSource;

impl PageSource for MmapSource {
  fn granularity(&self) -> usize {
    config::os_page_size().unwrap_or(config::PAGE_SIZE)
  }

  fn map(
    &mut self,
    bytes: usize,
  ) -> Result<NonNull<u8>> {
    let address = unsafe {
      libc::mmap(
        ptr::null_mut(),
        bytes,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == libc::MAP_FAILED {
      return Err(AllocError::MapFailed {
        bytes,
        source: io::Error::last_os_error(),
      });
    }

    log::trace!("mapped {bytes} bytes at {address:?}");

    NonNull::new(address as *mut u8).ok_or_else(|| AllocError::MapFailed {
      bytes,
      source: io::Error::other("kernel returned a null mapping"),
    })
  }

  unsafe fn unmap(
    &mut self,
    ptr: NonNull<u8>,
    bytes: usize,
  ) -> Result<()> {
    let status = unsafe { libc::munmap(ptr.as_ptr().cast(), bytes) };

    if status != 0 {
      return Err(AllocError::UnmapFailed {
        address: ptr.as_ptr() as usize,
        bytes,
        source: io::Error::last_os_error(),
      });
    }

    log::trace!("unmapped {bytes} bytes at {ptr:?}");

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_map_write_unmap() {
    let mut source = MmapSource;
    let bytes = 2 * source.granularity();

    let base = source.map(bytes).unwrap();

    unsafe {
      assert_eq!(base.as_ptr().read(), 0);
      assert_eq!(base.as_ptr().add(bytes - 1).read(), 0);

      base.as_ptr().write(0xAB);
      base.as_ptr().add(bytes - 1).write(0xCD);

      assert_eq!(base.as_ptr().read(), 0xAB);
      assert_eq!(base.as_ptr().add(bytes - 1).read(), 0xCD);

      source.unmap(base, bytes).unwrap();
    }
  }

  #[test]
  fn test_map_failure_is_reported() {
    let mut source = MmapSource;

    let err = source.map(usize::MAX & !(source.granularity() - 1)).unwrap_err();

    assert!(matches!(err, AllocError::MapFailed { .. }));
  }
}
