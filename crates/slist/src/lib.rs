//! A singly-linked list of `u32` values with a pluggable allocator.
//!
//! Every piece of storage the list uses comes from the [`RawAlloc`] provider
//! it was created with: the list record, each node and each cursor record.
//! Providers live in the [`alloc_binding`] crate and include a pair of
//! registrable function slots, process-wide slots, the platform heap and an
//! instrumenting wrapper.
//!
//! # Operations
//!
//! | Operation | Cost | Fails with |
//! |-----------|------|------------|
//! | [`List::new_in`] | O(1) | `Unbound`, `AllocationFailed` |
//! | [`List::insert_at_front`] | O(1) | `Unbound`, `AllocationFailed` |
//! | [`List::insert_at_end`] | O(n) | `Unbound`, `AllocationFailed` |
//! | [`List::insert_at`] | O(n) | allocation errors, `OutOfBounds` |
//! | [`List::remove_at`] | O(n) | `Empty`, `OutOfBounds` |
//! | [`List::find`] | O(n) | `NotFound` |
//! | [`List::len`] | O(n) | |
//! | [`List::cursor`] | O(n) | `Empty`, `OutOfBounds`, allocation errors |
//! | [`Cursor::advance`] | O(1) | `EndOfList` |
//!
//! A failed operation never leaves the chain partially modified.
//!
//! # Example
//!
//! ```rust
//! use alloc_binding::{FnBinding, heap_allocate, heap_release};
//! use slist::List;
//!
//! let mut binding = FnBinding::new();
//! unsafe {
//!     binding.register_allocate(Some(heap_allocate)).unwrap();
//!     binding.register_release(Some(heap_release)).unwrap();
//! }
//!
//! let mut list = List::new_in(binding).unwrap();
//! for v in 1..=4 {
//!     list.insert_at_end(v).unwrap();
//! }
//!
//! let mut cursor = list.cursor(0).unwrap();
//! let mut seen = vec![(cursor.index(), cursor.value())];
//! while cursor.advance().is_ok() {
//!     seen.push((cursor.index(), cursor.value()));
//! }
//! assert_eq!(seen, [(0, 1), (1, 2), (2, 3), (3, 4)]);
//! ```
//!
//! # Thread Safety
//!
//! Lists are `Send` when their provider is, and never `Sync`. Cursors borrow
//! their list, so the list cannot be modified or destroyed while a cursor is
//! alive.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use alloc_binding::{self, RawAlloc};

pub use self::{
    cursor::Cursor,
    error::ListError,
    list::{Iter, List},
};

mod cursor;
mod error;
mod list;
mod raw;
