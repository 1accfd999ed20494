//! Atomic header for concurrent or incremental collectors
//!
//! Mark bit and next address share one word, so a plain read-modify-write
//! from two threads could lose an update. Every mutation here is a single
//! atomic operation on the whole word: `fetch_or`/`fetch_and` for the mark
//! bit, a compare-and-swap loop for the next address.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use super::address::Address;
use super::header::Header;
use super::layout::{HIGH_MASK, MARK_MASK};
use super::tag::{ObjectKind, TypeTag};
use crate::error::{HeaderError, Result};

/// Header word stored in an `AtomicU64`.
///
/// Same layout as [`Header`]; it can stand in for it as the first field of
/// a `#[repr(C)]` object.
#[repr(transparent)]
pub struct AtomicHeader<T: TypeTag = ObjectKind> {
    word: AtomicU64,
    _tag: PhantomData<T>,
}

static_assertions::assert_eq_size!(AtomicHeader, u64);

impl<T: TypeTag> AtomicHeader<T> {
    pub fn new(header: Header<T>) -> Self {
        Self {
            word: AtomicU64::new(header.to_bits()),
            _tag: PhantomData,
        }
    }

    /// Consistent snapshot of all fields
    #[inline]
    pub fn load(&self) -> Header<T> {
        self.decode(self.word.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, header: Header<T>) {
        self.word.store(header.to_bits(), Ordering::Release);
    }

    #[inline]
    #[track_caller]
    pub fn get_type(&self) -> T {
        self.load().get_type()
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.word.load(Ordering::Acquire) & MARK_MASK != 0
    }

    #[inline]
    pub fn get_next(&self) -> Address {
        self.load().get_next()
    }

    /// Set or clear the mark bit atomically
    #[inline]
    pub fn set_marked(&self, marked: bool) {
        if marked {
            self.word.fetch_or(MARK_MASK, Ordering::AcqRel);
        } else {
            self.word.fetch_and(!MARK_MASK, Ordering::AcqRel);
        }
    }

    /// Set the mark bit, returning whether it was already set.
    ///
    /// Exactly one of several racing tracers observes `false`.
    #[inline]
    pub fn test_and_set_marked(&self) -> bool {
        self.word.fetch_or(MARK_MASK, Ordering::AcqRel) & MARK_MASK != 0
    }

    /// Replace the next address atomically; tag and mark are preserved
    pub fn set_next(&self, next: Address) {
        let mut current = self.word.load(Ordering::Acquire);
        loop {
            let new = (current & HIGH_MASK) | next.get();

            match self
                .word
                .compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(val) => current = val,
            }
        }
    }

    /// Install `new` only if the word still equals `current`.
    pub fn compare_exchange(&self, current: Header<T>, new: Header<T>) -> Result<Header<T>> {
        match self.word.compare_exchange(
            current.to_bits(),
            new.to_bits(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(val) => Ok(self.decode(val)),
            Err(current) => Err(HeaderError::AtomicUpdateFailed { current }),
        }
    }

    pub fn into_inner(self) -> Header<T> {
        Header::from_bits_unchecked(self.word.into_inner())
    }

    #[inline]
    fn decode(&self, bits: u64) -> Header<T> {
        Header::from_bits_unchecked(bits)
    }
}

impl<T: TypeTag> From<Header<T>> for AtomicHeader<T> {
    fn from(header: Header<T>) -> Self {
        Self::new(header)
    }
}

impl<T: TypeTag> fmt::Debug for AtomicHeader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicHeader").field(&self.load()).finish()
    }
}
