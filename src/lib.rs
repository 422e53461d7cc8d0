//! # pageheap - A Page-Backed Free-List Allocator
//!
//! This crate provides a general-purpose **first-fit free-list allocator**
//! that obtains its memory from anonymous `mmap(2)` page mappings.
//!
//! ## Overview
//!
//! Two layers make up the heap:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                               Heap                                   │
//!   │                                                                      │
//!   │   allocate(n) ──► small? ──yes──► FreeList::find_fit ──hit──► split  │
//!   │                     │                    │                           │
//!   │                     no                  miss                         │
//!   │                     │                    │                           │
//!   │                     ▼                    ▼                           │
//!   │             dedicated mapping      fresh page, remainder inserted    │
//!   │                     │                    │                           │
//!   │   ┌─────────────────┴────────────────────┴───────────────────────┐   │
//!   │   │               PageSource (mmap / munmap)                     │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   pageheap
//!   ├── align      - Rounding helpers (align!, align_to!, div_up)
//!   ├── block      - Block ranges and the size header
//!   ├── config     - Page size configuration
//!   ├── error      - AllocError
//!   ├── free_list  - Address-ordered free cells with coalescing
//!   ├── heap       - Heap, the allocator context
//!   ├── page       - PageSource trait and the mmap source
//!   ├── report     - Free-list dump
//!   └── stats      - Counters and their text report
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pageheap::Heap;
//!
//! let mut heap = Heap::new();
//!
//! let ptr = heap.allocate(64).unwrap();
//!
//! unsafe {
//!     ptr.as_ptr().write_bytes(0x2A, 64);
//!     heap.release(ptr).unwrap();
//! }
//!
//! assert_eq!(heap.stats().outstanding(), 0);
//! ```
//!
//! ## How It Works
//!
//! Every block carries a one-word header holding its total size:
//!
//! ```text
//!   ┌───────────────────────┬────────────────────────────────┐
//!   │    Header (1 word)    │         User Data              │
//!   │      size: N          │     N - 1 word usable          │
//!   └───────────────────────┴────────────────────────────────┘
//!                           ▲
//!                           └── Pointer returned to user
//! ```
//!
//! Blocks smaller than a page are carved from free cells. Released blocks go
//! back to the free list in address order and merge with the cells right
//! before and after them:
//!
//! ```text
//!   page:  ┌────┬──────┬──────┬───────────────────────────┐
//!          │ A  │  B   │  C   │        free cell          │
//!          └────┴──────┴──────┴───────────────────────────┘
//!
//!   release B, A, C:
//!          ┌──────────────────────────────────────────────┐
//!          │                 one free cell                │
//!          └──────────────────────────────────────────────┘
//! ```
//!
//! Larger requests get their own mapping, rounded up to whole pages, and are
//! unmapped directly when released.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: a [`Heap`] is not locked; share it behind your
//!   own synchronization if needed
//! - **Word alignment only**: payloads are aligned to `usize`
//! - **Unix-only**: requires `libc` and `mmap`
//!
//! ## Safety
//!
//! Releasing a pointer that did not come from the same heap, or releasing it
//! twice, is undefined behaviour, which is why [`Heap::release`] is `unsafe`.

pub mod align;
mod block;
mod config;
mod error;
mod free_list;
mod heap;
mod page;
mod report;
mod stats;

pub use block::{Block, HEADER_SIZE, MIN_BLOCK};
pub use config::{Config, PAGE_SIZE, PAGE_SIZE_VAR};
pub use error::{AllocError, Result};
pub use free_list::FreeList;
pub use heap::Heap;
pub use page::{MmapSource, PageSource};
pub use report::FreeListReport;
pub use stats::Stats;
