use std::{mem, ptr::NonNull};

/// Bytes reserved in front of every payload for the block size.
pub const HEADER_SIZE: usize = mem::size_of::<usize>();

/// Smallest block handed out.
pub const MIN_BLOCK: usize = 2 * HEADER_SIZE;

/// A contiguous range of heap memory: `[addr, addr + size)`.
///
/// The same shape describes allocated blocks and free cells; while a range is
/// allocated its first word holds `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
  pub addr: usize,
  pub size: usize,
}

impl Block {
  pub fn new(
    addr: usize,
    size: usize,
  ) -> Self {
    Self { addr, size }
  }

  pub fn end(&self) -> usize {
    self.addr + self.size
  }

  /// Writes the size header and returns the payload pointer.
  ///
  /// # Safety
  ///
  /// `addr` must point to at least `HEADER_SIZE` writable, word aligned bytes
  /// owned by the heap.
  pub unsafe fn stamp(self) -> NonNull<u8> {
    unsafe {
      let header = self.addr as *mut usize;
      header.write(self.size);

      NonNull::new_unchecked((header as *mut u8).add(HEADER_SIZE))
    }
  }

  /// Recovers the block behind a payload pointer by reading its header.
  ///
  /// # Safety
  ///
  /// `payload` must come from [`Block::stamp`] and its header must be intact.
  pub unsafe fn from_payload(payload: NonNull<u8>) -> Self {
    unsafe {
      let header = payload.as_ptr().sub(HEADER_SIZE) as *const usize;

      Self {
        addr: header as usize,
        size: header.read(),
      }
    }
  }
}
