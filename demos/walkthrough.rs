use std::io::Read;

use pageheap::{Config, Heap};

/// Waits until the user presses ENTER.
/// Useful when you want to inspect the mappings with `pmap` or `/proc/<pid>/maps`
/// while the heap grows and shrinks.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn show(
  label: &str,
  heap: &Heap,
) {
  println!("\n[{label}] PID = {}", std::process::id());
  heap.print_free_list();
  heap.print_stats();
}

fn main() -> pageheap::Result<()> {
  env_logger::init();

  // PAGEHEAP_PAGE_SIZE overrides the OS page size.
  let mut heap = Heap::with_config(Config::from_env()?)?;

  unsafe {
    show("start", &heap);
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 1) Three small blocks carved from the first page.
    // --------------------------------------------------------------------
    let a = heap.allocate(100)?;
    let b = heap.allocate(200)?;
    let c = heap.allocate(300)?;

    a.as_ptr().write_bytes(0xAA, 100);
    b.as_ptr().write_bytes(0xBB, 200);
    c.as_ptr().write_bytes(0xCC, 300);

    println!("\n[1] a = {a:?}, b = {b:?}, c = {c:?}");
    show("1", &heap);
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 2) Release the middle block: it becomes a free cell of its own.
    // --------------------------------------------------------------------
    heap.release(b)?;
    show("2", &heap);
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 3) A smaller request reuses the hole left by b (first fit).
    // --------------------------------------------------------------------
    let d = heap.allocate(64)?;
    println!(
      "\n[3] d = {d:?}, reused b? {}",
      if d == b { "Yes" } else { "No" }
    );
    show("3", &heap);
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 4) A 64 KiB request gets its own mapping and leaves the list alone.
    // --------------------------------------------------------------------
    let big = heap.allocate(64 * 1024)?;
    big.as_ptr().write_bytes(0x11, 64 * 1024);
    show("4", &heap);
    block_until_enter_pressed();

    heap.release(big)?;

    // --------------------------------------------------------------------
    // 5) Release everything: the page collapses back into one cell.
    // --------------------------------------------------------------------
    heap.release(a)?;
    heap.release(d)?;
    heap.release(c)?;
    show("5", &heap);
  }

  println!("\n[6] End of example. Mappings are abandoned to the OS at exit.");

  Ok(())
}
