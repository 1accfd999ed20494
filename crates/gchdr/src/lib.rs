//! # gchdr - Compact 64-bit Object Header
//!
//! gchdr packs the per-object metadata of a mark-sweep garbage collector
//! into a single machine word: a type tag, a mark bit and the intrusive
//! "next object" link of the allocator's all-objects list.
//!
//! ## Overview
//!
//! A naive header spends 128 bits: a tag byte, a mark flag, padding, and
//! a separate 64-bit `next` pointer. User-space addresses on x86-64 and
//! AArch64 use at most 48 bits, so the pointer shares its word with the
//! tag and the mark bit:
//!
//! ```text
//! 64-bit Header Layout:
//! ┌────────────┬──────────┬─────┬──────────────────────────────┐
//! │  Type tag  │ Reserved │  M  │     Next-object address      │
//! │   63-56    │  55-49   │ 48  │            47-0              │
//! └────────────┴──────────┴─────┴──────────────────────────────┘
//! ```
//!
//! - The tag is set once when the object is allocated and read on every
//!   dynamic dispatch.
//! - The mark bit and the link are only touched by the collector.
//! - The reserved bits are always zero.
//!
//! See [`object::layout`] for the tag-low alternative and why it is not used.
//!
//! ## Quick Start
//!
//! ```rust
//! use gchdr::{Address, Header, ObjectKind};
//!
//! fn main() -> Result<(), gchdr::HeaderError> {
//!     let next = Address::new(0x0000_1234_5678_9ABC)?;
//!     let mut header = Header::new(ObjectKind::String, next);
//!
//!     assert_eq!(header.get_type(), ObjectKind::String);
//!     assert!(!header.is_marked());
//!
//!     header.set_marked(true);
//!     header.set_next(Address::NULL);
//!     assert_eq!(header.get_type(), ObjectKind::String);
//!     assert!(header.is_marked());
//!
//!     // Addresses wider than 48 bits never reach a header
//!     assert!(Address::new(0x0001_0000_0000_0000).is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Safety
//!
//! The codec is safe code. [`ObjectList`] links objects through raw
//! addresses and its mutating operations are `unsafe`: callers guarantee
//! the objects stay alive while linked and free them after unlinking.
//!
//! ### Thread Safety
//!
//! - `Header` is a plain value for stop-the-world collectors
//! - `AtomicHeader` applies every update as one compare-and-swap
//! - `ObjectList` is neither `Send` nor `Sync`
//!
//! ## Modules
//!
//! - [`config`]: List checking parameters and validation
//! - [`error`]: Error types and the fatal violation path
//! - [`object`]: Header codec, tags, addresses, atomic header, object list
//! - [`snapshot`]: Serializable heap snapshots
//! - [`util`]: Formatting helpers

pub mod config;
pub mod error;
pub mod object;
pub mod snapshot;
pub mod util;

// Re-export main types for convenience
pub use config::HeaderConfig;
pub use error::{HeaderError, Result};
pub use object::{
    Address, AtomicHeader, Header, HeapObject, ObjectKind, ObjectList, TypeTag, HEADER_SIZE,
};
pub use snapshot::{HeaderSnapshot, HeapSnapshot};

/// gchdr version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
