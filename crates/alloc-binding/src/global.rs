//! Process-wide allocator slots.
//!
//! The slots are empty until [`register_allocate`] and [`register_release`]
//! are called, normally once at startup before any list is created. Lists
//! built with [`Global`] read the slots on every allocation and release.
//!
//! ```rust
//! use alloc_binding::{
//!     global::{self, Global},
//!     heap_allocate, heap_release, RawAlloc as _,
//! };
//!
//! unsafe {
//!     global::register_allocate(Some(heap_allocate)).unwrap();
//!     global::register_release(Some(heap_release)).unwrap();
//! }
//! assert_eq!(Global.missing_slot(), None);
//! ```

use core::{alloc::Layout, ptr::NonNull};

use spin::RwLock;

use crate::{AllocateFn, FnBinding, RawAlloc, RegisterError, ReleaseFn, Slot};

static SLOTS: RwLock<FnBinding> = RwLock::new(FnBinding::new());

/// Stores `allocate` in the process-wide allocate slot.
///
/// Passing `None` fails and keeps the function registered before.
///
/// # Safety
///
/// Same contract as [`FnBinding::register_allocate`]. Storage already handed
/// out must stay releasable by the registered release function.
#[track_caller]
pub unsafe fn register_allocate(allocate: Option<AllocateFn>) -> Result<(), RegisterError> {
    unsafe { SLOTS.write().register_allocate(allocate) }
}

/// Stores `release` in the process-wide release slot.
///
/// Passing `None` fails and keeps the function registered before.
///
/// # Safety
///
/// Same contract as [`FnBinding::register_release`].
#[track_caller]
pub unsafe fn register_release(release: Option<ReleaseFn>) -> Result<(), RegisterError> {
    unsafe { SLOTS.write().register_release(release) }
}

/// Returns a copy of the current process-wide slots.
#[must_use]
pub fn binding() -> FnBinding {
    *SLOTS.read()
}

/// Provider that forwards to the process-wide slots.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

// The slots are copied out of the lock before calling into them, so a
// registered function may itself register without deadlocking.
unsafe impl RawAlloc for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        binding().allocate(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { binding().release(ptr, layout) }
    }

    fn missing_slot(&self) -> Option<Slot> {
        binding().missing_slot()
    }
}
