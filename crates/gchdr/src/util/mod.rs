//! Util Module - Shared Utilities

pub mod debug;

pub use debug::{format_address, format_word};
