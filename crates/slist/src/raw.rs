//! Typed storage on top of a byte-oriented provider.

use core::{alloc::Layout, ptr::NonNull};

use alloc_binding::RawAlloc;
use log::{debug, warn};

use crate::error::{AllocationFailedSnafu, ListError, UnboundSnafu};

/// Moves `value` into storage obtained from `alloc`.
///
/// Fails without calling the provider if it cannot release what it would
/// hand out.
#[track_caller]
pub(crate) fn emplace<A, T>(alloc: &A, value: T) -> Result<NonNull<T>, ListError>
where
    A: RawAlloc + ?Sized,
{
    if let Some(slot) = alloc.missing_slot() {
        warn!("refusing to allocate: no {slot} function registered");
        return UnboundSnafu { slot }.fail();
    }

    let layout = Layout::new::<T>();
    let Some(ptr) = alloc.allocate(layout) else {
        debug!("allocator refused {} bytes", layout.size());
        return AllocationFailedSnafu {
            size: layout.size(),
            align: layout.align(),
        }
        .fail();
    };

    let ptr = ptr.cast::<T>();
    unsafe { ptr.write(value); }
    Ok(ptr)
}

/// Moves the value out of `ptr` and returns its storage to `alloc`.
///
/// # Safety
///
/// `ptr` must have been returned by [`emplace`] with the same `alloc`, and
/// must not be used after this call.
pub(crate) unsafe fn dispose<A, T>(alloc: &A, ptr: NonNull<T>) -> T
where
    A: RawAlloc + ?Sized,
{
    unsafe {
        let value = ptr.read();
        alloc.release(ptr.cast(), Layout::new::<T>());
        value
    }
}
