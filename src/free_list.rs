use crate::block::Block;

/// Address-ordered list of free cells.
///
/// Cells are kept sorted by address and pairwise disjoint. Every insertion is
/// followed by a coalescing pass, so two neighbouring cells are never
/// physically adjacent.
///
/// ```text
///   cells:  [ 0x1000 +48 ] -> [ 0x1080 +256 ] -> [ 0x3010 +4080 ]
///              gap ▲              gap ▲
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FreeList {
  cells: Vec<Block>,
}

impl FreeList {
  pub fn new() -> Self {
    Self { cells: Vec::new() }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn get(
    &self,
    position: usize,
  ) -> Option<Block> {
    self.cells.get(position).copied()
  }

  /// Cells in ascending address order.
  pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
    self.cells.iter().copied()
  }

  /// Position of the first cell, in address order, holding at least
  /// `min_size` bytes.
  pub fn find_fit(
    &self,
    min_size: usize,
  ) -> Option<usize> {
    self.cells.iter().position(|cell| cell.size >= min_size)
  }

  /// Inserts `cell` at its address position and coalesces the list.
  pub fn insert(
    &mut self,
    cell: Block,
  ) {
    let position = self.cells.partition_point(|other| other.addr < cell.addr);

    debug_assert!(
      position == 0 || self.cells[position - 1].end() <= cell.addr,
      "cell {cell:?} overlaps its predecessor"
    );
    debug_assert!(
      position == self.cells.len() || cell.end() <= self.cells[position].addr,
      "cell {cell:?} overlaps its successor"
    );

    self.cells.insert(position, cell);
    self.coalesce();
  }

  /// Merges every run of physically adjacent cells into its first cell.
  pub fn coalesce(&mut self) {
    if self.cells.is_empty() {
      return;
    }

    let mut last = 0;

    for current in 1..self.cells.len() {
      let cell = self.cells[current];

      if self.cells[last].end() == cell.addr {
        self.cells[last].size += cell.size;
      } else {
        last += 1;
        self.cells[last] = cell;
      }
    }

    self.cells.truncate(last + 1);
  }

  /// Carves `size` bytes off the front of the cell at `position`.
  ///
  /// The remainder takes the cell's place in the list; an exact fit removes
  /// the cell. Returns `None` if there is no such cell or it is too small.
  pub(crate) fn split(
    &mut self,
    position: usize,
    size: usize,
  ) -> Option<Block> {
    let cell = self.get(position).filter(|cell| cell.size >= size)?;

    let remainder = cell.size - size;

    if remainder == 0 {
      self.cells.remove(position);
    } else {
      self.cells[position] = Block::new(cell.addr + size, remainder);
    }

    Some(Block::new(cell.addr, size))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn list(cells: &[(usize, usize)]) -> FreeList {
    let mut free_list = FreeList::new();

    for &(addr, size) in cells {
      free_list.insert(Block::new(addr, size));
    }

    free_list
  }

  fn cells(free_list: &FreeList) -> Vec<(usize, usize)> {
    free_list.iter().map(|cell| (cell.addr, cell.size)).collect()
  }

  #[test]
  fn test_find_fit_is_first_fit() {
    let free_list = list(&[(0x1000, 40), (0x2000, 100), (0x3000, 24)]);

    let position = free_list.find_fit(30).unwrap();
    assert_eq!(free_list.get(position), Some(Block::new(0x1000, 40)));

    let position = free_list.find_fit(41).unwrap();
    assert_eq!(free_list.get(position), Some(Block::new(0x2000, 100)));

    assert_eq!(free_list.find_fit(101), None);
    assert_eq!(FreeList::new().find_fit(1), None);
  }

  #[test]
  fn test_insert_keeps_address_order() {
    let mut free_list = list(&[(0x2000, 16)]);

    // tail
    free_list.insert(Block::new(0x4000, 16));
    // new head
    free_list.insert(Block::new(0x1000, 16));
    // middle
    free_list.insert(Block::new(0x3000, 16));

    assert_eq!(
      cells(&free_list),
      vec![(0x1000, 16), (0x2000, 16), (0x3000, 16), (0x4000, 16)]
    );
  }

  #[test]
  fn test_insert_coalesces_neighbours() {
    let mut free_list = list(&[(0x1000, 32), (0x1040, 32)]);
    assert_eq!(free_list.len(), 2);

    // Bridges the gap between both cells.
    free_list.insert(Block::new(0x1020, 32));

    assert_eq!(cells(&free_list), vec![(0x1000, 96)]);
  }

  #[test]
  fn test_coalesce_merges_runs_and_is_idempotent() {
    let mut free_list = FreeList {
      cells: vec![
        Block::new(0x1000, 16),
        Block::new(0x1010, 16),
        Block::new(0x1020, 32),
        Block::new(0x2000, 16),
        Block::new(0x3000, 16),
        Block::new(0x3010, 16),
      ],
    };

    free_list.coalesce();
    let once = free_list.clone();
    free_list.coalesce();

    assert_eq!(cells(&once), vec![(0x1000, 64), (0x2000, 16), (0x3000, 32)]);
    assert_eq!(once, free_list);
  }

  #[test]
  fn test_split_leaves_remainder_in_place() {
    let mut free_list = list(&[(0x1000, 64), (0x2000, 128), (0x3000, 64)]);

    let block = free_list.split(1, 32);

    assert_eq!(block, Some(Block::new(0x2000, 32)));
    assert_eq!(
      cells(&free_list),
      vec![(0x1000, 64), (0x2020, 96), (0x3000, 64)]
    );
  }

  #[test]
  fn test_split_keeps_word_sized_remainder() {
    let mut free_list = list(&[(0x2000, 40)]);

    assert_eq!(free_list.split(0, 32), Some(Block::new(0x2000, 32)));
    assert_eq!(cells(&free_list), vec![(0x2020, 8)]);
  }

  #[test]
  fn test_split_exact_fit_removes_cell() {
    let mut free_list = list(&[(0x1000, 64), (0x2000, 40)]);

    assert_eq!(free_list.split(0, 64), Some(Block::new(0x1000, 64)));
    assert_eq!(cells(&free_list), vec![(0x2000, 40)]);
  }

  #[test]
  fn test_split_rejects_oversized_or_missing_cell() {
    let mut free_list = list(&[(0x1000, 64)]);

    assert_eq!(free_list.split(0, 72), None);
    assert_eq!(free_list.split(1, 8), None);
    assert_eq!(cells(&free_list), vec![(0x1000, 64)]);
  }
}
