//! Test Utilities for the gchdr test suite
//!
//! Provides a toy heap of boxed objects whose headers are threaded through
//! an `ObjectList`, plus a minimal mark-sweep driver playing the allocator
//! and collector roles against the header contract.

#![allow(dead_code)]

use gchdr::{Address, Header, HeaderConfig, HeapObject, ObjectKind, ObjectList};
use std::collections::HashSet;
use std::ptr::NonNull;

/// ============================================================================
/// TEST OBJECT
/// ============================================================================

/// Heap object with a header and up to two outgoing references
#[repr(C)]
pub struct TestObject {
    pub header: Header,
    pub id: u64,
    pub refs: Vec<NonNull<TestObject>>,
}

unsafe impl HeapObject for TestObject {
    type Tag = ObjectKind;

    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }
}

/// ============================================================================
/// HEAP FIXTURE
/// ============================================================================

/// Owns every object it allocates; frees whatever is still linked on drop.
pub struct HeapFixture {
    pub list: ObjectList<TestObject>,
    pub roots: Vec<NonNull<TestObject>>,
    next_id: u64,
    pub freed: Vec<u64>,
}

impl HeapFixture {
    pub fn with_defaults() -> Self {
        Self::with_config(HeaderConfig::default())
    }

    pub fn with_config(config: HeaderConfig) -> Self {
        Self {
            list: ObjectList::with_config(config).expect("test config should be valid"),
            roots: Vec::new(),
            next_id: 0,
            freed: Vec::new(),
        }
    }

    /// Allocate an object and push it onto the all-objects list
    pub fn allocate(&mut self, kind: ObjectKind) -> NonNull<TestObject> {
        let obj = Box::new(TestObject {
            header: Header::new(kind, Address::NULL),
            id: self.next_id,
            refs: Vec::new(),
        });
        self.next_id += 1;
        let ptr = NonNull::from(Box::leak(obj));
        unsafe { self.list.push_front(ptr, kind) };
        ptr
    }

    pub fn link(&mut self, from: NonNull<TestObject>, to: NonNull<TestObject>) {
        unsafe { (*from.as_ptr()).refs.push(to) };
    }

    /// Mark phase: flag everything reachable from the roots
    pub fn mark(&mut self) {
        let mut stack = self.roots.clone();
        while let Some(obj) = stack.pop() {
            let obj = unsafe { &mut *obj.as_ptr() };
            if obj.header.is_marked() {
                continue;
            }
            obj.header.set_marked(true);
            stack.extend(obj.refs.iter().copied());
        }
    }

    /// Sweep phase: unlink and free unmarked objects, clear survivors' marks.
    /// Returns the ids freed in this cycle.
    pub fn sweep(&mut self) -> Vec<u64> {
        let mut freed = Vec::new();
        let mut prev: Option<NonNull<TestObject>> = None;
        let mut cursor = self.list.head();

        while let Some(obj) = cursor {
            let header = unsafe { *obj.as_ref().header() };
            cursor = header.get_next().as_ptr();

            if header.is_marked() {
                unsafe { (*obj.as_ptr()).header.set_marked(false) };
                prev = Some(obj);
            } else {
                let unlinked = unsafe { self.list.unlink_after(prev) }
                    .expect("sweep cursor out of sync with list");
                assert_eq!(unlinked, obj);
                let boxed = unsafe { Box::from_raw(unlinked.as_ptr()) };
                freed.push(boxed.id);
            }
        }

        self.freed.extend(freed.iter().copied());
        freed
    }

    /// Full stop-the-world cycle
    pub fn collect(&mut self) -> Vec<u64> {
        self.mark();
        self.sweep()
    }

    pub fn live_ids(&self) -> Vec<u64> {
        self.list.iter().map(|o| unsafe { o.as_ref().id }).collect()
    }
}

impl Drop for HeapFixture {
    fn drop(&mut self) {
        while let Some(obj) = unsafe { self.list.unlink_after(None) } {
            drop(unsafe { Box::from_raw(obj.as_ptr()) });
        }
    }
}

/// ============================================================================
/// ASSERTION HELPERS
/// ============================================================================

/// Assert that no object on the list still carries a mark bit
#[track_caller]
pub fn assert_no_marks(list: &ObjectList<TestObject>, context: &str) {
    for obj in list {
        let header = unsafe { obj.as_ref().header() };
        assert!(
            !header.is_marked(),
            "{}: object {} still marked after sweep - mark bit leaked into next cycle",
            context,
            header
        );
    }
}

/// Assert that every id appears at most once
#[track_caller]
pub fn assert_unique(ids: &[u64], context: &str) {
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(
        unique.len(),
        ids.len(),
        "{}: duplicate ids in {:?}",
        context,
        ids
    );
}
