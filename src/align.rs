/// Rounds the given size up to the machine word.
///
/// # Examples
///
/// ```rust
/// use pageheap::align;
///
/// match std::mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    $crate::align_to!($value, ::core::mem::size_of::<usize>())
  };
}

/// Rounds the given size up to `$align`, which must be a power of two.
///
/// ```rust
/// use pageheap::align_to;
///
/// assert_eq!(align_to!(1, 4096), 4096);
/// assert_eq!(align_to!(4096, 4096), 4096);
/// assert_eq!(align_to!(4097, 4096), 8192);
/// ```
#[macro_export]
macro_rules! align_to {
  ($value:expr, $align:expr) => {
    ($value + $align - 1) & !($align - 1)
  };
}

/// Ceiling division, used to count the pages a byte count occupies.
pub const fn div_up(
  value: usize,
  divisor: usize,
) -> usize {
  let quotient = value / divisor;

  if quotient * divisor == value { quotient } else { quotient + 1 }
}

#[cfg(test)]
mod tests {
  use std::mem;

  use super::div_up;

  #[test]
  fn test_align() {
    let ptr_size = mem::size_of::<usize>();

    let mut alignments = Vec::new();

    for i in 0..10 {
      let sizes = (ptr_size * i + 1)..=(ptr_size * (i + 1));

      let expected_alignment = ptr_size * (i + 1);

      alignments.push((sizes, expected_alignment));
    }

    for (sizes, expected) in alignments {
      for size in sizes {
        assert_eq!(expected, align!(size));
      }
    }

    assert_eq!(0, align!(0usize));
  }

  #[test]
  fn test_align_to_page() {
    let page = 4096usize;

    assert_eq!(page, align_to!(1usize, page));
    assert_eq!(page, align_to!(page, page));
    assert_eq!(3 * page, align_to!(2 * page + 1, page));
  }

  #[test]
  fn test_div_up() {
    assert_eq!(0, div_up(0, 4096));
    assert_eq!(1, div_up(1, 4096));
    assert_eq!(1, div_up(4096, 4096));
    assert_eq!(2, div_up(4097, 4096));
    assert_eq!(3, div_up(3 * 4096, 4096));
  }
}
