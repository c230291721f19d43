#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]
#![cfg(test)]

use alloc_binding::{FnBinding, Slot, heap::Heap, heap_allocate, heap_release, probe::Probe};
use slist::{List, ListError, RawAlloc};

fn collect_with_cursor<A>(list: &List<A>) -> Vec<(usize, u32)>
where
    A: RawAlloc,
{
    let mut cursor = list.cursor(0).unwrap();
    let mut seen = vec![(cursor.index(), cursor.value())];
    while cursor.advance().is_ok() {
        seen.push((cursor.index(), cursor.value()));
    }
    seen
}

#[test]
fn end_inserts_round_trip_through_cursor() {
    let mut list = List::new_in(Heap).unwrap();
    for v in 1..=4 {
        list.insert_at_end(v).unwrap();
    }
    assert_eq!(collect_with_cursor(&list), [(0, 1), (1, 2), (2, 3), (3, 4)]);
}

#[test]
fn empty_list_rejects_positional_operations() {
    let mut list = List::new_in(Heap).unwrap();
    assert!(list.remove_at(0).unwrap_err().is_empty());
    for x in [0, 1, u32::MAX] {
        assert!(list.find(x).unwrap_err().is_not_found());
    }
    assert!(list.cursor(0).unwrap_err().is_empty());
    assert_eq!(list.len(), 0);
}

#[test]
fn middle_insert_after_three_appends() {
    let mut list = List::new_in(Heap).unwrap();
    for v in [1, 2, 4] {
        list.insert_at_end(v).unwrap();
    }
    list.insert_at(2, 3).unwrap();
    assert_eq!(list.iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
}

#[test]
fn positional_inserts_build_same_list_as_edge_inserts() {
    let mut by_index = List::new_in(Heap).unwrap();
    assert!(by_index.insert_at(1, 0).unwrap_err().is_out_of_bounds());
    for (i, v) in (1..=4).enumerate() {
        by_index.insert_at(i, v).unwrap();
    }

    let mut by_front = List::new_in(Heap).unwrap();
    for v in (1..=4).rev() {
        by_front.insert_at_front(v).unwrap();
    }

    assert_eq!(
        by_index.iter().collect::<Vec<_>>(),
        by_front.iter().collect::<Vec<_>>()
    );
}

#[test]
fn failed_node_allocation_keeps_size() {
    let probe = Probe::new(Heap);
    let mut list = List::new_in(&probe).unwrap();
    list.insert_at_end(1).unwrap();
    list.insert_at_end(2).unwrap();

    probe.fail_next(1);
    let err = list.insert_at_end(3).unwrap_err();
    assert!(matches!(err, ListError::AllocationFailed { .. }));
    assert_eq!(list.len(), 2);

    list.insert_at_end(3).unwrap();
    assert_eq!(list.len(), 3);
    drop(list);
    assert_eq!(probe.outstanding(), 0);
}

#[test]
fn registered_function_slots_back_a_list() {
    let mut binding = FnBinding::new();
    assert!(List::new_in(binding).unwrap_err().is_unbound());

    unsafe { binding.register_allocate(Some(heap_allocate)).unwrap(); }
    let err = List::new_in(binding).unwrap_err();
    assert!(matches!(
        err,
        ListError::Unbound {
            slot: Slot::Release,
            ..
        }
    ));

    unsafe { binding.register_release(Some(heap_release)).unwrap(); }
    let mut list = List::new_in(binding).unwrap();
    list.insert_at_front(42).unwrap();
    assert_eq!(list.find(42).unwrap(), 0);
    list.destroy();
}

#[test]
fn one_provider_serves_several_lists() {
    let probe = Probe::new(Heap);
    let mut a = List::new_in(&probe).unwrap();
    let mut b = List::new_in(&probe).unwrap();
    a.insert_at_end(1).unwrap();
    b.insert_at_end(2).unwrap();
    b.insert_at_end(3).unwrap();
    assert_eq!(probe.outstanding(), 5);

    drop(a);
    assert_eq!(probe.outstanding(), 3);
    drop(b);
    assert_eq!(probe.outstanding(), 0);
}

#[test]
fn error_messages() {
    let mut list = List::new_in(Heap).unwrap();
    list.insert_at_end(1).unwrap();

    assert_eq!(
        list.insert_at(5, 0).unwrap_err().to_string(),
        "index 5 is out of bounds for a list of length 1"
    );
    assert_eq!(
        list.find(2).unwrap_err().to_string(),
        "value 2 is not in the list"
    );
    let mut cursor = list.cursor(0).unwrap();
    assert_eq!(
        cursor.advance().unwrap_err().to_string(),
        "cursor at index 0 is already on the last element"
    );
}
