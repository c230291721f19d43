//! An instrumenting wrapper around another provider.
//!
//! [`Probe`] counts every allocation and release that passes through it and
//! can be told to refuse the next few allocations, which makes out-of-memory
//! paths reachable on demand.
//!
//! This is a test double. The list engine never needs it; it exists so that
//! tests of the engine (and of code embedding it) can assert on leaks and
//! drive allocation failures. It is only compiled with the `probe` feature.
//!
//! ```rust
//! use core::alloc::Layout;
//!
//! use alloc_binding::{RawAlloc as _, heap::Heap, probe::Probe};
//!
//! let probe = Probe::new(Heap);
//! probe.fail_next(1);
//!
//! let layout = Layout::new::<u64>();
//! assert!(probe.allocate(layout).is_none());
//!
//! let ptr = probe.allocate(layout).unwrap();
//! assert_eq!(probe.outstanding(), 1);
//! unsafe { probe.release(ptr, layout); }
//! assert_eq!(probe.outstanding(), 0);
//! assert_eq!(probe.failures(), 1);
//! ```

use core::{alloc::Layout, cell::Cell, ptr::NonNull};

use log::trace;

use crate::{RawAlloc, Slot};

/// Counting, fault-injecting wrapper around a provider.
///
/// Meant for tests only: the counters are `Cell`s, so a `Probe` is not `Sync`.
#[derive(Debug, Default)]
pub struct Probe<A> {
    inner: A,
    fail_next: Cell<usize>,
    allocations: Cell<usize>,
    releases: Cell<usize>,
    failures: Cell<usize>,
}

impl<A> Probe<A> {
    /// Wraps `inner` with all counters at zero.
    #[must_use]
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            fail_next: Cell::new(0),
            allocations: Cell::new(0),
            releases: Cell::new(0),
            failures: Cell::new(0),
        }
    }

    /// Makes the next `count` allocations fail without reaching the inner
    /// provider.
    pub fn fail_next(&self, count: usize) {
        self.fail_next.set(count);
    }

    /// Number of successful allocations so far.
    #[must_use]
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Number of releases so far.
    #[must_use]
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Number of allocations refused, by injection or by the inner provider.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// Allocations not yet released.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.releases()
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

unsafe impl<A> RawAlloc for Probe<A>
where
    A: RawAlloc,
{
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let pending = self.fail_next.get();
        if pending > 0 {
            self.fail_next.set(pending - 1);
            self.failures.set(self.failures.get() + 1);
            trace!("injected failure for {} bytes", layout.size());
            return None;
        }

        let Some(ptr) = self.inner.allocate(layout) else {
            self.failures.set(self.failures.get() + 1);
            return None;
        };
        self.allocations.set(self.allocations.get() + 1);
        Some(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.releases.set(self.releases.get() + 1);
        unsafe { self.inner.release(ptr, layout) }
    }

    fn missing_slot(&self) -> Option<Slot> {
        self.inner.missing_slot()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnBinding;

    #[test]
    fn test_counts_balance() {
        let probe = Probe::new(crate::heap::Heap);
        let layout = Layout::from_size_align(16, 8).unwrap();
        let a = probe.allocate(layout).unwrap();
        let b = probe.allocate(layout).unwrap();
        assert_eq!(probe.allocations(), 2);
        assert_eq!(probe.outstanding(), 2);

        unsafe {
            probe.release(a, layout);
            probe.release(b, layout);
        }
        assert_eq!(probe.releases(), 2);
        assert_eq!(probe.outstanding(), 0);
        assert_eq!(probe.failures(), 0);
    }

    #[test]
    fn test_fail_next_is_consumed() {
        let probe = Probe::new(crate::heap::Heap);
        let layout = Layout::new::<u32>();
        probe.fail_next(2);
        assert!(probe.allocate(layout).is_none());
        assert!(probe.allocate(layout).is_none());

        let ptr = probe.allocate(layout).unwrap();
        unsafe { probe.release(ptr, layout); }
        assert_eq!(probe.failures(), 2);
        assert_eq!(probe.allocations(), 1);
    }

    #[test]
    fn test_forwards_missing_slot() {
        let probe = Probe::new(FnBinding::new());
        assert_eq!(probe.missing_slot(), Some(Slot::Allocate));
        assert!(probe.allocate(Layout::new::<u32>()).is_none());
        assert_eq!(probe.failures(), 1);
    }
}
