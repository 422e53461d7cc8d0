use std::ptr::NonNull;

use crate::{
  align,
  align::div_up,
  block::{Block, HEADER_SIZE, MIN_BLOCK},
  config::Config,
  error::{AllocError, Result},
  free_list::FreeList,
  page::{MmapSource, PageSource},
  report::FreeListReport,
  stats::Stats,
};

/// Page-backed heap with an address-ordered, first-fit free list.
///
/// Blocks whose header-inclusive size stays below one page are carved from the
/// free list. Anything larger gets a dedicated mapping which is unmapped again
/// on release.
///
/// A heap is a single-threaded context: every operation takes `&mut self` and
/// no locking happens inside. Dropping a heap leaves its mappings in place.
#[derive(Debug)]
pub struct Heap<S: PageSource = MmapSource> {
  source: S,
  page_size: usize,
  free_list: FreeList,
  stats: Stats,
}

impl Heap<MmapSource> {
  /// Heap over kernel mappings using the OS page size.
  pub fn new() -> Self {
    Self {
      source: MmapSource,
      page_size: Config::from_os().page_size,
      free_list: FreeList::new(),
      stats: Stats::default(),
    }
  }

  pub fn with_config(config: Config) -> Result<Self> {
    Self::with_source(config, MmapSource)
  }
}

impl Default for Heap<MmapSource> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: PageSource> Heap<S> {
  pub fn with_source(
    config: Config,
    source: S,
  ) -> Result<Self> {
    config.validate(source.granularity())?;

    Ok(Self {
      source,
      page_size: config.page_size,
      free_list: FreeList::new(),
      stats: Stats::default(),
    })
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn free_list(&self) -> &FreeList {
    &self.free_list
  }

  /// Counter snapshot; the free-list length is counted now.
  pub fn stats(&self) -> Stats {
    Stats {
      free_length: self.free_list.len(),
      ..self.stats
    }
  }

  pub fn print_stats(&self) {
    eprint!("\n{}", self.stats());
  }

  pub fn print_free_list(&self) {
    print!("{}", FreeListReport::new(&self.free_list));
  }

  /// Returns a word aligned pointer to at least `requested` usable bytes.
  pub fn allocate(
    &mut self,
    requested: usize,
  ) -> Result<NonNull<u8>> {
    self.stats.chunks_allocated += 1;

    let size = self.block_size(requested)?;

    let block = if size < self.page_size {
      self.take_small(size)?
    } else {
      self.take_large(size)?
    };

    Ok(unsafe { block.stamp() })
  }

  /// Gives a block back to the heap.
  ///
  /// # Safety
  ///
  /// `ptr` must have been returned by [`Heap::allocate`] on this heap and not
  /// released since. The header word in front of it must be intact.
  pub unsafe fn release(
    &mut self,
    ptr: NonNull<u8>,
  ) -> Result<()> {
    self.stats.chunks_freed += 1;

    let block = unsafe { Block::from_payload(ptr) };

    if block.size < self.page_size {
      self.free_list.insert(block);
      return Ok(());
    }

    let base = unsafe { NonNull::new_unchecked(ptr.as_ptr().sub(HEADER_SIZE)) };
    unsafe { self.release_pages(base, block.size) }
  }

  /// Header-inclusive, word aligned block size for a request.
  fn block_size(
    &self,
    requested: usize,
  ) -> Result<usize> {
    if requested > isize::MAX as usize - self.page_size {
      return Err(AllocError::SizeOverflow { requested });
    }

    Ok((align!(requested) + HEADER_SIZE).max(MIN_BLOCK))
  }

  fn take_small(
    &mut self,
    size: usize,
  ) -> Result<Block> {
    if self.free_list.is_empty() {
      let base = self.acquire(self.page_size)?;
      log::debug!("seeding free list with page at {base:?}");

      self.free_list.insert(Block::new(base.as_ptr() as usize, self.page_size - HEADER_SIZE));
    }

    if let Some(block) = self
      .free_list
      .find_fit(size)
      .and_then(|position| self.free_list.split(position, size))
    {
      return Ok(block);
    }

    let base = self.acquire(self.page_size)?.as_ptr() as usize;
    self.free_list.insert(Block::new(base + size, self.page_size - size));

    Ok(Block::new(base, size))
  }

  fn take_large(
    &mut self,
    size: usize,
  ) -> Result<Block> {
    let bytes = div_up(size, self.page_size) * self.page_size;
    let base = self.acquire(bytes)?;
    log::debug!("dedicated mapping of {bytes} bytes at {base:?}");

    Ok(Block::new(base.as_ptr() as usize, bytes))
  }

  /// Maps `bytes` rounded up to whole pages.
  fn acquire(
    &mut self,
    bytes: usize,
  ) -> Result<NonNull<u8>> {
    let pages = div_up(bytes, self.page_size);
    let base = self.source.map(pages * self.page_size)?;

    self.stats.pages_mapped += pages;

    Ok(base)
  }

  unsafe fn release_pages(
    &mut self,
    base: NonNull<u8>,
    bytes: usize,
  ) -> Result<()> {
    unsafe { self.source.unmap(base, bytes)? };

    self.stats.pages_unmapped += div_up(bytes, self.page_size);

    Ok(())
  }
}
