use std::fmt;

/// Snapshot of the heap counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
  pub pages_mapped: usize,
  pub pages_unmapped: usize,
  pub chunks_allocated: usize,
  pub chunks_freed: usize,
  /// Number of free cells, counted when the snapshot is taken.
  pub free_length: usize,
}

impl Stats {
  /// Blocks handed out and not yet released.
  pub fn outstanding(&self) -> usize {
    self.chunks_allocated - self.chunks_freed
  }

  /// Pages currently mapped by the heap.
  pub fn resident_pages(&self) -> usize {
    self.pages_mapped - self.pages_unmapped
  }
}

impl fmt::Display for Stats {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "== heap stats ==")?;
    writeln!(f, "Mapped:   {}", self.pages_mapped)?;
    writeln!(f, "Unmapped: {}", self.pages_unmapped)?;
    writeln!(f, "Allocs:   {}", self.chunks_allocated)?;
    writeln!(f, "Frees:    {}", self.chunks_freed)?;
    writeln!(f, "Freelen:  {}", self.free_length)
  }
}
