//! Header bit layout
//!
//! The header uses the tag-high layout:
//!
//! ```text
//! 63        56 55     49  48  47                                      0
//! ┌───────────┬─────────┬───┬─────────────────────────────────────────┐
//! │ type tag  │reserved │ M │           next-object address           │
//! │  8 bits   │ 7 bits  │ 1 │                48 bits                  │
//! └───────────┴─────────┴───┴─────────────────────────────────────────┘
//! ```
//!
//! The address sits in the low bits unshifted, so `get_next` is a single
//! mask. The type tag costs a shift by 56 on every read.
//!
//! A tag-low layout (tag in bits 0-7, address shifted up by 8) would turn
//! the hot `get_type` path into a pure mask at the cost of a shift on
//! `get_next`/`set_next`. It is not used here; the two layouts are not
//! bit-compatible, so every constant below is specific to tag-high.

/// Size of the header in bytes
pub const HEADER_SIZE: usize = 8;

/// Minimum heap object alignment (bytes). The low 3 address bits are
/// always zero but are kept as part of the address field.
pub const OBJECT_ALIGNMENT: usize = 8;

/// Significant address bits stored in the header
pub const ADDRESS_BITS: u32 = 48;

/// Bit positions
pub const MARK_SHIFT: u32 = 48;
pub const RESERVED_SHIFT: u32 = 49;
pub const TYPE_SHIFT: u32 = 56;

/// Masks for header fields
pub const ADDRESS_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;
pub const HIGH_MASK: u64 = !ADDRESS_MASK;
pub const MARK_MASK: u64 = 1 << MARK_SHIFT;
pub const RESERVED_MASK: u64 = 0x7F << RESERVED_SHIFT;
pub const TYPE_MASK: u64 = 0xFF << TYPE_SHIFT;

static_assertions::const_assert_eq!(ADDRESS_MASK, 0xFFFF_0000_0000_0000 ^ u64::MAX);
static_assertions::const_assert_eq!(ADDRESS_MASK & MARK_MASK, 0);
static_assertions::const_assert_eq!(MARK_MASK & RESERVED_MASK, 0);
static_assertions::const_assert_eq!(RESERVED_MASK & TYPE_MASK, 0);
static_assertions::const_assert_eq!(
    ADDRESS_MASK | MARK_MASK | RESERVED_MASK | TYPE_MASK,
    u64::MAX
);
