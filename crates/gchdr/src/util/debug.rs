//! Debug Utilities
//!
//! Formatting helpers for addresses and raw header words.

use crate::object::layout::{ADDRESS_MASK, MARK_SHIFT, RESERVED_MASK, TYPE_SHIFT};

/// Debug formatter for memory addresses
pub fn format_address(address: u64) -> String {
    format!("0x{:016X}", address)
}

/// Format a raw header word split at its field boundaries: `tag:pad|m:address`
pub fn format_word(bits: u64) -> String {
    format!(
        "{:02X}:{:02X}|{}:{:012X}",
        bits >> TYPE_SHIFT,
        (bits & RESERVED_MASK) >> (MARK_SHIFT + 1),
        (bits >> MARK_SHIFT) & 1,
        bits & ADDRESS_MASK
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(0x1000), "0x0000000000001000");
    }

    #[test]
    fn test_format_word() {
        assert_eq!(format_word(0x0301_1234_5678_9ABC), "03:00|1:123456789ABC");
        assert_eq!(format_word(0x0002_0000_0000_0000), "00:01|0:000000000000");
    }
}
