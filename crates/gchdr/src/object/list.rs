//! Intrusive all-objects list threaded through object headers
//!
//! The allocator pushes every new object onto the front of the list; the
//! sweep phase walks it and unlinks dead objects. The links live in the
//! headers themselves, so the list owns nothing but its head address.
//! Reclaiming an unlinked object's storage is the caller's job.

use std::marker::PhantomData;
use std::ptr::NonNull;

use super::address::Address;
use super::header::Header;
use super::tag::TypeTag;
use crate::config::HeaderConfig;
use crate::error::{violation, HeaderError, Result};
use crate::snapshot::{HeaderSnapshot, HeapSnapshot};

/// A heap object carrying a [`Header`].
///
/// # Safety
/// The list stores the object's own address in other objects' headers and
/// turns it back into `NonNull<Self>` while walking. Implementors must be
/// `#[repr(C)]` with the header as the first field, so the object address
/// and the header address coincide.
pub unsafe trait HeapObject {
    type Tag: TypeTag;

    fn header(&self) -> &Header<Self::Tag>;

    fn header_mut(&mut self) -> &mut Header<Self::Tag>;
}

/// Allocation-order list of every live heap object, newest first.
pub struct ObjectList<O: HeapObject> {
    head: Address,
    config: HeaderConfig,
    _marker: PhantomData<*mut O>,
}

impl<O: HeapObject> ObjectList<O> {
    /// Create an empty list with the default configuration
    pub fn new() -> Self {
        Self {
            head: Address::NULL,
            config: HeaderConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Create an empty list, validating `config`
    pub fn with_config(config: HeaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Initialize `obj`'s header and link it in front of the current head.
    ///
    /// # Safety
    /// `obj` must point to a live object that is not already in any list
    /// and must stay valid until it is unlinked again.
    pub unsafe fn try_push_front(&mut self, obj: NonNull<O>, tag: O::Tag) -> Result<()> {
        let address = Address::try_from_ptr(obj.as_ptr())?;
        if self.config.verify_alignment && !address.is_aligned(self.config.alignment) {
            return Err(HeaderError::Misaligned {
                address: address.get(),
                alignment: self.config.alignment,
            });
        }

        *(*obj.as_ptr()).header_mut() = Header::new(tag, self.head);
        if self.config.trace_mutations {
            log::trace!("push {} ({:?}) -> {}", address, tag, self.head);
        }

        self.head = address;
        Ok(())
    }

    /// Like [`try_push_front`](Self::try_push_front), but an over-wide or
    /// misaligned address is fatal.
    ///
    /// # Safety
    /// Same contract as `try_push_front`.
    #[track_caller]
    pub unsafe fn push_front(&mut self, obj: NonNull<O>, tag: O::Tag) {
        if let Err(err) = self.try_push_front(obj, tag) {
            violation(err);
        }
    }

    /// Most recently pushed object
    #[inline]
    pub fn head(&self) -> Option<NonNull<O>> {
        self.head.as_ptr()
    }

    /// Number of objects reachable from the head.
    ///
    /// Walks the chain, so it stays correct when a collector unlinks
    /// objects through their headers instead of [`unlink_after`](Self::unlink_after).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    pub fn iter(&self) -> Iter<'_, O> {
        Iter {
            cursor: self.head,
            _list: PhantomData,
        }
    }

    /// Unlink the successor of `prev`, or the head when `prev` is `None`.
    ///
    /// Returns the unlinked object with its next address cleared, or
    /// `None` if there was no successor.
    ///
    /// # Safety
    /// `prev`, if given, must be an object currently in this list.
    pub unsafe fn unlink_after(&mut self, prev: Option<NonNull<O>>) -> Option<NonNull<O>> {
        let victim: NonNull<O> = match prev {
            None => self.head.as_ptr()?,
            Some(prev) => (*prev.as_ptr()).header().get_next().as_ptr()?,
        };

        let victim_header = (*victim.as_ptr()).header_mut();
        let next = victim_header.get_next();
        victim_header.set_next(Address::NULL);

        match prev {
            None => self.head = next,
            Some(prev) => (*prev.as_ptr()).header_mut().set_next(next),
        }

        if self.config.trace_mutations {
            log::trace!(
                "unlink {} (after {})",
                Address::from_ptr(victim.as_ptr()),
                prev.map_or(Address::NULL, |p| Address::from_ptr(p.as_ptr()))
            );
        }
        Some(victim)
    }

    /// Clear the mark bit of every object, returning how many were set.
    pub fn clear_marks(&mut self) -> usize {
        let mut cleared = 0;
        let mut visited = 0;
        for obj in self.iter() {
            visited += 1;
            // SAFETY: every node was linked through `push_front`, whose
            // contract keeps it valid while it is in the list.
            let header = unsafe { (*obj.as_ptr()).header_mut() };
            if header.is_marked() {
                header.set_marked(false);
                cleared += 1;
            }
        }
        log::debug!("cleared {} mark bits across {} objects", cleared, visited);
        cleared
    }

    /// Capture every header in list order
    pub fn snapshot(&self) -> HeapSnapshot {
        let objects = self
            .iter()
            .map(|obj| {
                // SAFETY: see `clear_marks`.
                let header = unsafe { *obj.as_ref().header() };
                HeaderSnapshot::capture(Address::from_ptr(obj.as_ptr()), header)
            })
            .collect();
        HeapSnapshot::new(self.head, objects)
    }
}

impl<O: HeapObject> Default for ObjectList<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the objects of an [`ObjectList`], newest first
pub struct Iter<'a, O: HeapObject> {
    cursor: Address,
    _list: PhantomData<&'a ObjectList<O>>,
}

impl<'a, O: HeapObject> Iterator for Iter<'a, O> {
    type Item = NonNull<O>;

    fn next(&mut self) -> Option<NonNull<O>> {
        let obj: NonNull<O> = self.cursor.as_ptr()?;
        // SAFETY: see `ObjectList::clear_marks`.
        self.cursor = unsafe { obj.as_ref().header().get_next() };
        Some(obj)
    }
}

impl<'a, O: HeapObject> IntoIterator for &'a ObjectList<O> {
    type Item = NonNull<O>;
    type IntoIter = Iter<'a, O>;

    fn into_iter(self) -> Iter<'a, O> {
        self.iter()
    }
}
