//! The platform heap as an allocation provider.

use alloc::alloc::{alloc, dealloc};
use core::{alloc::Layout, ptr::NonNull};

use crate::RawAlloc;

/// Allocates `layout` from the platform heap.
///
/// Zero-sized requests are refused; the list engine never makes one.
#[must_use]
pub fn heap_allocate(layout: Layout) -> Option<NonNull<u8>> {
    if layout.size() == 0 {
        return None;
    }
    NonNull::new(unsafe { alloc(layout) })
}

/// Returns storage obtained from [`heap_allocate`] to the platform heap.
///
/// # Safety
///
/// `ptr` must have been returned by [`heap_allocate`] with the same `layout`
/// and must not have been released since.
pub unsafe fn heap_release(ptr: NonNull<u8>, layout: Layout) {
    unsafe { dealloc(ptr.as_ptr(), layout) }
}

/// Provider backed by the platform heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap;

unsafe impl RawAlloc for Heap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        heap_allocate(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { heap_release(ptr, layout) }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_refused() {
        let layout = Layout::from_size_align(0, 1).unwrap();
        assert!(Heap.allocate(layout).is_none());
    }

    #[test]
    fn test_alignment() {
        let layout = Layout::from_size_align(32, 64).unwrap();
        let ptr = Heap.allocate(layout).unwrap();
        assert_eq!(ptr.addr().get() % 64, 0);
        unsafe { Heap.release(ptr, layout); }
    }
}
