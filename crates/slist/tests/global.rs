#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]
#![cfg(test)]

use alloc_binding::{
    Slot,
    global::{self, Global},
    heap_allocate, heap_release,
};
use slist::{List, ListError};

// The process-wide slots are shared by every test in this binary, so the
// whole startup sequence runs in one test.
#[test]
fn list_on_process_wide_slots() {
    let err = List::new_in(Global).unwrap_err();
    assert!(matches!(
        err,
        ListError::Unbound {
            slot: Slot::Allocate,
            ..
        }
    ));

    unsafe {
        global::register_allocate(Some(heap_allocate)).unwrap();
        global::register_release(Some(heap_release)).unwrap();
        assert!(global::register_release(None).is_err());
    }

    let mut list = List::new_in(Global).unwrap();
    for v in [3, 1, 3] {
        list.insert_at_end(v).unwrap();
    }
    assert_eq!(list.find(3).unwrap(), 0);
    assert_eq!(list.remove_at(2).unwrap(), 3);
    assert_eq!(list.len(), 2);
    list.destroy();
}
