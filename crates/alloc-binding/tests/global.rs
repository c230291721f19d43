#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]
#![cfg(test)]

use core::alloc::Layout;

use alloc_binding::{
    RawAlloc as _, Slot,
    global::{self, Global},
    heap_allocate, heap_release,
};

// The process-wide slots are shared by every test in this binary, so the
// whole lifecycle is checked in order inside one test.
#[test]
fn global_slots_lifecycle() {
    assert_eq!(Global.missing_slot(), Some(Slot::Allocate));
    assert!(Global.allocate(Layout::new::<u32>()).is_none());

    unsafe {
        let err = global::register_allocate(None).unwrap_err();
        assert_eq!(err.slot(), Slot::Allocate);
        global::register_allocate(Some(heap_allocate)).unwrap();
    }
    assert_eq!(Global.missing_slot(), Some(Slot::Release));

    unsafe { global::register_release(Some(heap_release)).unwrap(); }
    assert_eq!(Global.missing_slot(), None);
    assert!(global::binding().is_bound());

    // a null registration leaves the bound functions in place
    unsafe {
        assert!(global::register_allocate(None).is_err());
        assert!(global::register_release(None).is_err());
    }
    assert!(global::binding().is_bound());

    let layout = Layout::from_size_align(16, 8).unwrap();
    let ptr = Global.allocate(layout).unwrap();
    unsafe {
        ptr.as_ptr().write_bytes(0x5a, layout.size());
        Global.release(ptr, layout);
    }
}
