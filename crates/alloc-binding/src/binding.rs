use core::{alloc::Layout, ptr::NonNull};

use log::{debug, warn};
use snafu::{Location, Snafu};

use crate::{RawAlloc, Slot};

/// Signature of a function that can fill the allocate slot.
pub type AllocateFn = fn(Layout) -> Option<NonNull<u8>>;

/// Signature of a function that can fill the release slot.
pub type ReleaseFn = unsafe fn(NonNull<u8>, Layout);

/// The error returned when registering a null function into a slot.
#[derive(Debug, Snafu)]
#[snafu(display("cannot register a null {slot} function"))]
pub struct RegisterError {
    slot: Slot,
    #[snafu(implicit)]
    location: Location,
}

impl RegisterError {
    /// Returns the slot the registration was refused for.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns where the registration was attempted.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// A pair of allocate/release function slots.
///
/// Both slots start out empty. An empty allocate slot makes every allocation
/// fail; an empty release slot leaks whatever is passed to it. The list engine
/// checks [`missing_slot`](RawAlloc::missing_slot) before allocating, so in
/// practice neither case is reached through a list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FnBinding {
    allocate: Option<AllocateFn>,
    release: Option<ReleaseFn>,
}

impl FnBinding {
    /// Creates a binding with both slots empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allocate: None,
            release: None,
        }
    }

    /// Creates a binding with both slots filled.
    ///
    /// # Safety
    ///
    /// `allocate` and `release` must together uphold the [`RawAlloc`]
    /// contract: `release` accepts exactly the storage `allocate` hands out.
    #[must_use]
    pub const unsafe fn with(allocate: AllocateFn, release: ReleaseFn) -> Self {
        Self {
            allocate: Some(allocate),
            release: Some(release),
        }
    }

    /// Stores `allocate` in the allocate slot.
    ///
    /// Passing `None` fails and keeps the function registered before.
    ///
    /// # Safety
    ///
    /// Storage returned by `allocate` must satisfy the requested layout, and
    /// the function in the release slot must be able to free it.
    #[track_caller]
    pub unsafe fn register_allocate(
        &mut self,
        allocate: Option<AllocateFn>,
    ) -> Result<(), RegisterError> {
        let Some(allocate) = allocate else {
            debug!("refused null allocate function");
            return RegisterSnafu {
                slot: Slot::Allocate,
            }
            .fail();
        };
        self.allocate = Some(allocate);
        Ok(())
    }

    /// Stores `release` in the release slot.
    ///
    /// Passing `None` fails and keeps the function registered before.
    ///
    /// # Safety
    ///
    /// `release` must accept every pointer/layout pair produced by the
    /// function in the allocate slot.
    #[track_caller]
    pub unsafe fn register_release(&mut self, release: Option<ReleaseFn>) -> Result<(), RegisterError> {
        let Some(release) = release else {
            debug!("refused null release function");
            return RegisterSnafu {
                slot: Slot::Release,
            }
            .fail();
        };
        self.release = Some(release);
        Ok(())
    }

    /// Returns `true` if both slots are filled.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.allocate.is_some() && self.release.is_some()
    }
}

unsafe impl RawAlloc for FnBinding {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let Some(allocate) = self.allocate else {
            warn!(
                "allocation of {} bytes requested from an empty allocate slot",
                layout.size()
            );
            return None;
        };
        allocate(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        match self.release {
            Some(release) => unsafe { release(ptr, layout) },
            None => warn!(
                "leaking {} bytes at {ptr:p}: release slot is empty",
                layout.size()
            ),
        }
    }

    fn missing_slot(&self) -> Option<Slot> {
        if self.allocate.is_none() {
            Some(Slot::Allocate)
        } else if self.release.is_none() {
            Some(Slot::Release)
        } else {
            None
        }
    }
}
