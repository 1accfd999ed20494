//! Object addresses that fit the header's 48-bit next field

use std::fmt;
use std::ptr::NonNull;

use super::layout::{ADDRESS_BITS, ADDRESS_MASK};
use crate::error::{violation, HeaderError, Result};
use crate::util::debug::format_address;

/// A non-owning heap object address with at most 48 significant bits.
///
/// The width check happens here, once, so the header codec can store an
/// `Address` without re-validating it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(u64);

impl Address {
    /// End-of-list marker
    pub const NULL: Address = Address(0);

    /// Largest storable address
    pub const MAX: Address = Address(ADDRESS_MASK);

    pub const BITS: u32 = ADDRESS_BITS;

    /// Validate a raw address value.
    #[inline]
    pub fn new(raw: u64) -> Result<Self> {
        if raw & !ADDRESS_MASK != 0 {
            return Err(HeaderError::PointerWidth { address: raw });
        }
        Ok(Address(raw))
    }

    /// Wrap a value already masked to the address field.
    #[inline]
    pub(crate) const fn from_masked(raw: u64) -> Self {
        Address(raw & ADDRESS_MASK)
    }

    /// Validate an object pointer.
    #[inline]
    pub fn try_from_ptr<T>(ptr: *const T) -> Result<Self> {
        Self::new(ptr as usize as u64)
    }

    /// Convert an object pointer, treating an over-wide address as fatal.
    #[inline]
    #[track_caller]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        match Self::try_from_ptr(ptr) {
            Ok(address) => address,
            Err(err) => violation(err),
        }
    }

    /// Raw address value
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Check alignment. Returns `false` when `alignment` is not a power
    /// of two, so no address is aligned to 0.
    #[inline]
    pub const fn is_aligned(self, alignment: usize) -> bool {
        alignment.is_power_of_two() && self.0 & (alignment as u64 - 1) == 0
    }

    /// Reinterpret as an object pointer; `None` for the null address.
    #[inline]
    pub fn as_ptr<T>(self) -> Option<NonNull<T>> {
        NonNull::new(self.0 as usize as *mut T)
    }
}

impl TryFrom<u64> for Address {
    type Error = HeaderError;

    fn try_from(raw: u64) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Address> for u64 {
    fn from(address: Address) -> u64 {
        address.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", format_address(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            f.write_str(&format_address(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_values() {
        assert_eq!(Address::new(0x0000_FFFF_FFFF_FFFF), Ok(Address::MAX));
        assert_eq!(
            Address::new(0x0001_0000_0000_0000),
            Err(HeaderError::PointerWidth {
                address: 0x0001_0000_0000_0000
            })
        );
        assert!(Address::new(u64::MAX).is_err());
    }

    #[test]
    fn test_null() {
        assert!(Address::NULL.is_null());
        assert!(Address::NULL.as_ptr::<u64>().is_none());
        assert_eq!(Address::default(), Address::NULL);
        assert_eq!(Address::NULL.to_string(), "null");
    }

    #[test]
    fn test_from_real_pointer() {
        let boxed = Box::new(42u64);
        let ptr: *const u64 = &*boxed;
        let address = Address::from_ptr(ptr);
        assert_eq!(address.get(), ptr as usize as u64);
        assert!(address.is_aligned(8));
        let back = address.as_ptr::<u64>().unwrap();
        assert_eq!(unsafe { *back.as_ptr() }, 42);
    }

    #[test]
    fn test_alignment() {
        assert!(Address::new(0x1000).unwrap().is_aligned(8));
        assert!(!Address::new(0x1004).unwrap().is_aligned(8));
        assert!(Address::new(0x1004).unwrap().is_aligned(4));
    }

    #[test]
    fn test_alignment_rejects_non_power_of_two() {
        let address = Address::new(0x1000).unwrap();
        assert!(!address.is_aligned(0));
        assert!(!address.is_aligned(24));
        assert!(!Address::NULL.is_aligned(0));
        assert!(Address::NULL.is_aligned(1));
    }

    #[test]
    #[should_panic(expected = "pointer-width")]
    fn test_from_ptr_rejects_wide_pointer() {
        Address::from_ptr(0x0001_0000_0000_0000usize as *const u8);
    }
}
