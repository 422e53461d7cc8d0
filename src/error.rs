use std::io;

use thiserror::Error;

/// Result alias for every fallible heap operation.
pub type Result<T> = std::result::Result<T, AllocError>;

#[derive(Error, Debug)]
pub enum AllocError {
  #[error("failed to map {bytes} bytes: {source}")]
  MapFailed {
    bytes: usize,
    #[source]
    source: io::Error,
  },

  #[error("failed to unmap {bytes} bytes at 0x{address:x}: {source}")]
  UnmapFailed {
    address: usize,
    bytes: usize,
    #[source]
    source: io::Error,
  },

  #[error("allocation of {requested} bytes overflows the address space")]
  SizeOverflow { requested: usize },

  #[error("invalid page size {page_size}: must be a power of two and a multiple of {granularity}")]
  InvalidPageSize { page_size: usize, granularity: usize },

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}
