//! Per-thread heap allocation accounting.
//!
//! Install [`CountingAllocator`] as the global allocator of a binary or test
//! crate to have the benchmark report allocations per trial:
//!
//! ```ignore
//! use matmul_loops::alloc_counter::CountingAllocator;
//!
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator;
//! ```
//!
//! Counters are thread-local, so concurrent test threads don't see each
//! other's allocations. Without the allocator installed every snapshot reads
//! zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    // const-initialised and drop-free: touching these never allocates.
    static ALLOCATIONS: Cell<u64> = const { Cell::new(0) };
    static BYTES: Cell<u64> = const { Cell::new(0) };
}

/// [`System`] allocator that counts allocations made on each thread.
pub struct CountingAllocator;

fn record(size: usize) {
    // try_with: the slot may already be gone during thread teardown.
    let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
    let _ = BYTES.try_with(|b| b.set(b.get() + size as u64));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record(new_size);
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// Counter values at one point in time on the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    pub allocations: u64,
    pub bytes: u64,
}

impl AllocSnapshot {
    pub fn now() -> Self {
        Self {
            allocations: ALLOCATIONS.try_with(Cell::get).unwrap_or(0),
            bytes: BYTES.try_with(Cell::get).unwrap_or(0),
        }
    }

    /// Allocations made on this thread since `self` was taken.
    pub fn elapsed(&self) -> AllocSnapshot {
        let now = Self::now();
        AllocSnapshot {
            allocations: now.allocations.saturating_sub(self.allocations),
            bytes: now.bytes.saturating_sub(self.bytes),
        }
    }
}
