//! Object Module - header model for GC-managed objects
//!
//! This module defines the packed header word and the list threaded
//! through it.

pub mod address;
pub mod atomic;
pub mod header;
pub mod layout;
pub mod list;
pub mod tag;

pub use address::Address;
pub use atomic::AtomicHeader;
pub use header::Header;
pub use layout::{HEADER_SIZE, OBJECT_ALIGNMENT};
pub use list::{HeapObject, ObjectList};
pub use tag::{ObjectKind, TypeTag};
