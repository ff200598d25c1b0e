//! Integration tests for garbage collection of Uninstantiable types
//!
//! Tests cover:
//! - Rooted type objects keep their type record, meta-object and context
//! - Unrooted type objects are freed along with their type record
//! - Clones keep the shared type record (and its type object) alive
//! - Contexts survive only while something references them
//! - Multiple collection cycles

use strata_engine::{
    GarbageCollector, Heap, HeapOptions, ObjectSpace, Representation, RootSet, UNINSTANTIABLE,
};

#[test]
fn test_rooted_type_object_survives() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let how = UNINSTANTIABLE.type_object_for(&mut heap, None);
    let what = UNINSTANTIABLE.type_object_for(&mut heap, Some(how));
    let record = heap.type_record_of(what).unwrap();

    let mut roots = RootSet::new();
    roots.add_root(what);

    let freed = gc.collect(&mut heap, &roots);
    assert_eq!(freed, 0);
    assert!(heap.contains_object(what));
    assert!(heap.contains_object(how));
    assert!(heap.contains_type_record(record));
    assert!(heap.object(what).unwrap().has_body());
}

#[test]
fn test_unrooted_type_is_freed() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let how = UNINSTANTIABLE.type_object_for(&mut heap, None);
    let kept = UNINSTANTIABLE.type_object_for(&mut heap, Some(how));
    let dropped = UNINSTANTIABLE.type_object_for(&mut heap, Some(how));
    let dropped_record = heap.type_record_of(dropped).unwrap();

    let mut roots = RootSet::new();
    roots.add_root(kept);

    assert_eq!(gc.collect(&mut heap, &roots), 1);
    assert!(!heap.contains_object(dropped));
    assert!(!heap.contains_type_record(dropped_record));
    assert!(heap.contains_object(kept));
    assert!(heap.contains_object(how));

    let stats = heap.stats();
    assert_eq!(stats.objects, 2);
    assert_eq!(stats.bodies, 2);
    assert_eq!(stats.type_records, 2);
}

#[test]
fn test_clone_keeps_type_record_alive() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let what = UNINSTANTIABLE.type_object_for(&mut heap, None);
    let record = heap.type_record_of(what).unwrap();
    let copy = UNINSTANTIABLE.clone_object(&mut heap, what).unwrap();

    let mut roots = RootSet::new();
    roots.add_root(copy);

    assert_eq!(gc.collect(&mut heap, &roots), 0);
    assert!(heap.contains_type_record(record));
    assert!(heap.contains_object(what));

    roots.clear();
    assert_eq!(gc.collect(&mut heap, &roots), 2);
    assert!(!heap.contains_type_record(record));
}

#[test]
fn test_object_context_marked() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let what = UNINSTANTIABLE.type_object_for(&mut heap, None);
    let sc = heap.create_context("unit-a");
    let orphan = heap.create_context("unit-b");
    heap.set_context(what, sc).unwrap();

    let mut roots = RootSet::new();
    roots.add_root(what);
    gc.collect(&mut heap, &roots);

    assert!(heap.contains_context(sc));
    assert!(!heap.contains_context(orphan));
    assert_eq!(gc.stats().contexts_freed, 1);
}

#[test]
fn test_type_record_context_marked() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let what = UNINSTANTIABLE.type_object_for(&mut heap, None);
    let record = heap.type_record_of(what).unwrap();
    let sc = heap.create_context("unit");
    heap.set_type_context(record, sc).unwrap();

    let mut roots = RootSet::new();
    roots.add_root(what);
    gc.collect(&mut heap, &roots);
    assert!(heap.contains_context(sc));

    roots.clear();
    gc.collect(&mut heap, &roots);
    assert!(!heap.contains_context(sc));
}

#[test]
fn test_multiple_cycles_and_stats() {
    let mut heap = Heap::with_options(HeapOptions::new().with_initial_capacity(4));
    let mut gc = GarbageCollector::with_options(&HeapOptions::new().with_gc_threshold(3));
    let roots = RootSet::new();

    for cycle in 1..=3 {
        for _ in 0..3 {
            UNINSTANTIABLE.type_object_for(&mut heap, None);
        }
        assert!(gc.should_collect(&heap));
        assert_eq!(gc.collect(&mut heap, &roots), 3);
        assert_eq!(gc.stats().collections, cycle);
        assert!(!gc.should_collect(&heap));
    }

    assert_eq!(gc.stats().objects_freed, 9);
    assert_eq!(gc.stats().type_records_freed, 9);
    assert_eq!(gc.stats().last_freed_count, 3);
    assert_eq!(heap.stats().objects, 0);
}

#[test]
fn test_freed_slots_are_reused() {
    let mut heap = Heap::new();
    let mut gc = GarbageCollector::default();
    let first = UNINSTANTIABLE.type_object_for(&mut heap, None);
    gc.collect(&mut heap, &RootSet::new());

    let second = UNINSTANTIABLE.type_object_for(&mut heap, None);
    assert_eq!(first, second);
    assert!(!UNINSTANTIABLE.defined(&heap, second));
}
