//! Allocation providers for the `slist` list engine.
//!
//! Every byte of storage the list engine uses (list records, nodes and cursor
//! records) is requested from a [`RawAlloc`] provider handed to it by the
//! caller. The engine never talks to the platform allocator itself, so an
//! embedding application can substitute arenas, tracking allocators or
//! fault-injecting allocators without touching the engine.
//!
//! # Available Providers
//!
//! ## [`FnBinding`]
//!
//! A pair of function slots (allocate and release), unset until registered.
//! Registering a "null" function (`None`) is rejected and leaves the previous
//! function in place. There is no way to unregister a slot.
//!
//! ## [`Global`](global::Global) (feature `global`)
//!
//! The same pair of slots, shared by the whole process. Registration is meant
//! to happen once at startup, before the first list is created.
//!
//! ## [`Heap`](heap::Heap) (feature `heap`)
//!
//! Forwards to the platform heap. The functions [`heap_allocate`] and
//! [`heap_release`] have the slot signatures, so they can also be registered
//! into a [`FnBinding`].
//!
//! ## [`Probe`](probe::Probe) (feature `probe`)
//!
//! Wraps another provider, counts allocations and releases, and can refuse a
//! chosen number of upcoming allocations.
//!
//! # Usage Example
//!
//! ```rust
//! use core::alloc::Layout;
//!
//! use alloc_binding::{FnBinding, RawAlloc as _, Slot, heap_allocate, heap_release};
//!
//! let mut binding = FnBinding::new();
//! assert_eq!(binding.missing_slot(), Some(Slot::Allocate));
//!
//! unsafe {
//!     binding.register_allocate(Some(heap_allocate)).unwrap();
//!     binding.register_release(Some(heap_release)).unwrap();
//!     // Null registrations are refused.
//!     assert!(binding.register_release(None).is_err());
//! }
//! assert_eq!(binding.missing_slot(), None);
//!
//! let layout = Layout::new::<u64>();
//! let ptr = binding.allocate(layout).unwrap();
//! unsafe { binding.release(ptr, layout); }
//! ```

#![cfg_attr(not(test), no_std)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(feature = "heap")]
extern crate alloc;

use core::{alloc::Layout, ptr::NonNull};

pub use self::binding::{AllocateFn, FnBinding, RegisterError, ReleaseFn};
#[cfg(feature = "heap")]
pub use self::heap::{heap_allocate, heap_release};

mod binding;
#[cfg(feature = "global")]
pub mod global;
#[cfg(feature = "heap")]
pub mod heap;
#[cfg(feature = "probe")]
pub mod probe;

/// One of the two function slots of an allocator binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Slot {
    #[display("allocate")]
    Allocate,
    #[display("release")]
    Release,
}

/// A source of raw storage for the list engine.
///
/// # Safety
///
/// Implementors must ensure that:
///
/// - storage returned by [`allocate`](Self::allocate) is valid for reads and
///   writes of `layout.size()` bytes and aligned to `layout.align()`
/// - that storage stays valid and is not handed out again until it is passed
///   back to [`release`](Self::release)
pub unsafe trait RawAlloc {
    /// Requests storage for `layout`, or `None` if no storage is available.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Returns storage obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this provider with the
    /// same `layout`, and must not have been released since.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns the first slot this provider has no function for.
    ///
    /// The list engine refuses to allocate from a provider that cannot also
    /// release what it hands out.
    fn missing_slot(&self) -> Option<Slot> {
        None
    }
}

unsafe impl<A> RawAlloc for &A
where
    A: RawAlloc + ?Sized,
{
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).release(ptr, layout) }
    }

    fn missing_slot(&self) -> Option<Slot> {
        (**self).missing_slot()
    }
}
