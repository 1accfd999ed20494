//! Object list under a mark-sweep driver
//!
//! The fixture in `common` plays allocator and collector; these tests
//! check that headers carry the list and the marks through whole cycles.

mod common;

use common::{assert_no_marks, assert_unique, HeapFixture};
use gchdr::{Address, HeaderConfig, HeapObject, ObjectKind};

#[test]
fn test_allocation_pushes_front() {
    let mut heap = HeapFixture::with_defaults();
    let a = heap.allocate(ObjectKind::String);
    let b = heap.allocate(ObjectKind::Class);

    assert_eq!(heap.list.head(), Some(b));
    assert_eq!(heap.live_ids(), vec![1, 0]);

    let header = unsafe { *b.as_ref().header() };
    assert_eq!(header.get_type(), ObjectKind::Class);
    assert!(!header.is_marked());
    assert_eq!(header.get_next(), Address::from_ptr(a.as_ptr()));
}

#[test]
fn test_unreachable_objects_are_swept() {
    let mut heap = HeapFixture::with_defaults();
    let root = heap.allocate(ObjectKind::Instance);
    let child = heap.allocate(ObjectKind::String);
    let _garbage = heap.allocate(ObjectKind::Closure);
    let _more_garbage = heap.allocate(ObjectKind::Upvalue);
    heap.link(root, child);
    heap.roots.push(root);

    let mut freed = heap.collect();
    freed.sort_unstable();

    assert_eq!(freed, vec![2, 3]);
    assert_eq!(heap.live_ids(), vec![1, 0]);
    assert_eq!(heap.list.len(), 2);
    assert_no_marks(&heap.list, "after first cycle");
}

#[test]
fn test_survivors_are_unmarked_between_cycles() {
    let mut heap = HeapFixture::with_defaults();
    let root = heap.allocate(ObjectKind::Function);
    heap.roots.push(root);

    for cycle in 0..3 {
        let freed = heap.collect();
        assert!(freed.is_empty(), "cycle {} freed a rooted object", cycle);
        assert_no_marks(&heap.list, "between cycles");
    }

    // Dropping the root makes it garbage on the next cycle.
    heap.roots.clear();
    assert_eq!(heap.collect(), vec![0]);
    assert!(heap.list.is_empty());
}

#[test]
fn test_sweep_unlinks_head_middle_and_tail() {
    let mut heap = HeapFixture::with_defaults();
    let objs: Vec<_> = (0..5).map(|_| heap.allocate(ObjectKind::Instance)).collect();
    // list order: 4 3 2 1 0; keep 3 and 1
    heap.roots.push(objs[3]);
    heap.roots.push(objs[1]);

    let mut freed = heap.collect();
    freed.sort_unstable();
    assert_eq!(freed, vec![0, 2, 4]);
    assert_eq!(heap.live_ids(), vec![3, 1]);

    let snapshot = heap.list.snapshot();
    snapshot.verify_links().unwrap();
    assert_eq!(snapshot.objects.len(), 2);
    assert_eq!(snapshot.objects[1].next, 0);
}

#[test]
fn test_cycles_in_object_graph() {
    let mut heap = HeapFixture::with_defaults();
    let a = heap.allocate(ObjectKind::Instance);
    let b = heap.allocate(ObjectKind::Instance);
    let c = heap.allocate(ObjectKind::Instance);
    heap.link(a, b);
    heap.link(b, a);
    heap.link(c, c);
    heap.roots.push(a);

    assert_eq!(heap.collect(), vec![2]);
    assert_eq!(heap.live_ids(), vec![1, 0]);
}

#[test]
fn test_many_allocations_and_cycles() {
    let mut heap = HeapFixture::with_defaults();
    let mut kept = Vec::new();

    for round in 0..10u64 {
        for i in 0..100u64 {
            let obj = heap.allocate(ObjectKind::ALL[(i % 8) as usize]);
            if i % 10 == 0 {
                heap.roots.push(obj);
                kept.push(round * 100 + i);
            }
        }
        heap.collect();
        assert_eq!(heap.list.len(), kept.len());
    }

    let mut live = heap.live_ids();
    assert_unique(&live, "live set");
    live.sort_unstable();
    assert_eq!(live, kept);
    assert_unique(&heap.freed, "freed set");
    assert_eq!(heap.freed.len(), 900);
}

#[test]
fn test_snapshot_json_of_live_heap() {
    let mut heap = HeapFixture::with_config(HeaderConfig {
        trace_mutations: true,
        ..Default::default()
    });
    let root = heap.allocate(ObjectKind::Class);
    heap.allocate(ObjectKind::String);
    heap.roots.push(root);
    heap.mark();

    let snapshot = heap.list.snapshot();
    assert_eq!(snapshot.marked_count(), 1);
    assert_eq!(snapshot.objects[0].type_name, "string");
    assert_eq!(snapshot.objects[1].type_name, "class");

    let json = snapshot.to_json().unwrap();
    let restored = gchdr::HeapSnapshot::from_json(&json).unwrap();
    restored.verify_links().unwrap();
    for entry in &restored.objects {
        entry.decode::<ObjectKind>().unwrap();
    }

    heap.sweep();
    assert_eq!(heap.list.clear_marks(), 0);
}
