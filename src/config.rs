use std::env;

use crate::{
  block::MIN_BLOCK,
  error::{AllocError, Result},
};

/// Default page size, the granularity of every mapping the heap requests.
pub const PAGE_SIZE: usize = 4096;

/// Environment variable read by [`Config::from_env`].
pub const PAGE_SIZE_VAR: &str = "PAGEHEAP_PAGE_SIZE";

/// Heap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  pub page_size: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self { page_size: PAGE_SIZE }
  }
}

impl Config {
  pub fn new(page_size: usize) -> Self {
    Self { page_size }
  }

  /// Uses the page size reported by the operating system.
  pub fn from_os() -> Self {
    Self {
      page_size: os_page_size().unwrap_or(PAGE_SIZE),
    }
  }

  /// Reads [`PAGE_SIZE_VAR`], falling back to [`Config::from_os`] when unset.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    match lookup(PAGE_SIZE_VAR) {
      Some(raw) => {
        let page_size = raw
          .trim()
          .parse::<usize>()
          .map_err(|err| AllocError::InvalidConfig(format!("{PAGE_SIZE_VAR}={raw:?}: {err}")))?;

        Ok(Self { page_size })
      }
      None => Ok(Self::from_os()),
    }
  }

  /// Checks the page size against the mapping granularity of the page source.
  pub fn validate(
    &self,
    granularity: usize,
  ) -> Result<()> {
    let page_size = self.page_size;

    if !page_size.is_power_of_two()
      || page_size < 4 * MIN_BLOCK
      || granularity == 0
      || page_size % granularity != 0
    {
      return Err(AllocError::InvalidPageSize { page_size, granularity });
    }

    Ok(())
  }
}

pub(crate) fn os_page_size() -> Option<usize> {
  let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

  if size > 0 { Some(size as usize) } else { None }
}
