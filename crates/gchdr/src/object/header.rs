//! Object Header - packed metadata word for GC-managed objects
//!
//! Object Header Layout (8 bytes on 64-bit):
//! ┌─────────────────────────────────────────┐
//! │         Header Word (8 bytes)           │  <- u64
//! │  - Bits 0-47:  Next-object address      │
//! │  - Bit 48:     Mark bit                 │
//! │  - Bits 49-55: Reserved (always zero)   │
//! │  - Bits 56-63: Type tag                 │
//! └─────────────────────────────────────────┘
//!
//! The header replaces a 16-byte layout (tag, mark, padding, then a
//! separate next pointer). Every field access goes through the methods
//! below; the raw word is only exposed read-only through [`Header::to_bits`].

use std::fmt;
use std::marker::PhantomData;

use super::address::Address;
use super::layout::{
    ADDRESS_MASK, HIGH_MASK, MARK_MASK, MARK_SHIFT, RESERVED_MASK, TYPE_SHIFT,
};
use super::tag::{ObjectKind, TypeTag};
use crate::error::{violation, HeaderError, Result};
use crate::util::debug::format_word;

/// Object Header
///
/// Embedded as the first field of every `#[repr(C)]` heap object so that
/// a pointer to the object is also a pointer to its header.
///
/// - Type tag: set once by [`Header::new`], never rewritten
/// - Mark bit: only meaningful during a collection cycle
/// - Next address: non-owning link in the allocator's object list
#[repr(transparent)]
pub struct Header<T: TypeTag = ObjectKind> {
    bits: u64,
    _tag: PhantomData<T>,
}

static_assertions::assert_eq_size!(Header, u64);
static_assertions::assert_eq_align!(Header, u64);

impl<T: TypeTag> Header<T> {
    #[inline]
    pub(crate) const fn from_bits_unchecked(bits: u64) -> Self {
        Self {
            bits,
            _tag: PhantomData,
        }
    }

    /// Create a fresh header: tag set, mark clear, next = `next`.
    ///
    /// This is the only construction path for a new object's header.
    #[inline]
    pub fn new(tag: T, next: Address) -> Self {
        Self::from_bits_unchecked(next.get() | ((tag.to_raw() as u64) << TYPE_SHIFT))
    }

    /// Checked construction from a raw tag byte and raw address.
    pub fn try_new(raw_tag: u8, next: u64) -> Result<Self> {
        let tag = T::from_raw(raw_tag).ok_or(HeaderError::TagRange { raw: raw_tag })?;
        Ok(Self::new(tag, Address::new(next)?))
    }

    /// Decode a raw word read from memory or from a persisted snapshot.
    ///
    /// Rejects words with reserved bits set or an unknown type tag.
    pub fn from_bits(bits: u64) -> Result<Self> {
        crate::ensure!(
            bits & RESERVED_MASK == 0,
            HeaderError::ReservedBits {
                bits: bits & RESERVED_MASK
            }
        );
        let header = Self::from_bits_unchecked(bits);
        header.try_get_type()?;
        Ok(header)
    }

    /// Raw header word
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.bits
    }

    // === Type Tag ===

    /// Raw type tag byte
    #[inline]
    pub const fn raw_type(self) -> u8 {
        (self.bits >> TYPE_SHIFT) as u8
    }

    /// Decode the type tag, reporting an unknown byte as an error
    #[inline]
    pub fn try_get_type(self) -> Result<T> {
        let raw = self.raw_type();
        T::from_raw(raw).ok_or(HeaderError::TagRange { raw })
    }

    /// Decode the type tag. An unknown tag means the header is corrupted
    /// and is fatal.
    #[inline]
    #[track_caller]
    pub fn get_type(self) -> T {
        match self.try_get_type() {
            Ok(tag) => tag,
            Err(err) => violation(err),
        }
    }

    // === Mark Bit ===

    #[inline]
    pub const fn is_marked(self) -> bool {
        (self.bits >> MARK_SHIFT) & 1 != 0
    }

    /// Header with the mark bit replaced; every other bit is preserved.
    #[inline]
    #[must_use]
    pub const fn with_marked(self, marked: bool) -> Self {
        Self::from_bits_unchecked((self.bits & !MARK_MASK) | ((marked as u64) << MARK_SHIFT))
    }

    #[inline]
    pub fn set_marked(&mut self, marked: bool) {
        *self = self.with_marked(marked);
    }

    // === Next Address ===

    #[inline]
    pub fn get_next(self) -> Address {
        Address::from_masked(self.bits & ADDRESS_MASK)
    }

    /// Header with the next address replaced; tag and mark are preserved.
    #[inline]
    #[must_use]
    pub fn with_next(self, next: Address) -> Self {
        Self::from_bits_unchecked((self.bits & HIGH_MASK) | next.get())
    }

    #[inline]
    pub fn set_next(&mut self, next: Address) {
        *self = self.with_next(next);
    }
}

impl<T: TypeTag> Clone for Header<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TypeTag> Copy for Header<T> {}

impl<T: TypeTag> PartialEq for Header<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T: TypeTag> Eq for Header<T> {}

impl<T: TypeTag> fmt::Debug for Header<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Header");
        match self.try_get_type() {
            Ok(tag) => s.field("type", &tag),
            Err(_) => s.field("type", &format_args!("<invalid {}>", self.raw_type())),
        };
        s.field("marked", &self.is_marked())
            .field("next", &self.get_next())
            .field("bits", &format_args!("{}", format_word(self.bits)))
            .finish()
    }
}

impl<T: TypeTag> fmt::Display for Header<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.try_get_type() {
            Ok(tag) => tag.name(),
            Err(_) => "<invalid>",
        };
        write!(
            f,
            "{}{} -> {}",
            name,
            if self.is_marked() { " [marked]" } else { "" },
            self.get_next()
        )
    }
}
