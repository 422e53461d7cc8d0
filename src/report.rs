use std::fmt;

use crate::free_list::FreeList;

/// Free-list dump: one line per cell with its ordinal, address, size, the
/// next cell's address (0 at the tail) and the distance to it.
pub struct FreeListReport<'a> {
  free_list: &'a FreeList,
}

impl<'a> FreeListReport<'a> {
  pub fn new(free_list: &'a FreeList) -> Self {
    Self { free_list }
  }
}

impl fmt::Display for FreeListReport<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    let mut cells = self.free_list.iter().peekable();
    let mut ordinal = 1;

    while let Some(cell) = cells.next() {
      let next = cells.peek().map_or(0, |next| next.addr);
      let delta = next as isize - cell.addr as isize;

      writeln!(
        f,
        "Free list node #{ordinal}, address = {}, size = {}, next = {next}, {delta}",
        cell.addr, cell.size
      )?;

      ordinal += 1;
    }

    writeln!(f)
  }
}
