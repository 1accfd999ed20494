//! Error Module - Header Error Types
//!
//! Defines all error types used by the header codec and the list layer.
//!
//! # Error Categories
//!
//! ## Invariant Violations
//! - `PointerWidth` - Address needs more than 48 bits
//! - `TagRange` - Type tag outside the known enumeration
//! - `ReservedBits` - Raw word with reserved bits 49-55 set
//! - `Misaligned` - Object address off the heap alignment
//!
//! ## Concurrency Errors
//! - `AtomicUpdateFailed` - CAS operation lost a race
//!
//! ## Configuration Errors
//! - `Configuration` - Invalid configuration
//!
//! ## Snapshot Errors
//! - `Snapshot` - Unreadable or inconsistent heap snapshot
//!
//! Invariant violations are never recovered from inside the crate. Fatal
//! paths go through [`violation`], which logs the diagnostic and panics.
//! The `Result`-returning variants exist for callers decoding words they
//! did not build themselves (debuggers, persisted snapshots).

use thiserror::Error;

/// Main error type for all header operations
///
/// # Examples
///
/// ```rust
/// use gchdr::error::HeaderError;
///
/// fn handle_error(err: HeaderError) {
///     match err {
///         HeaderError::PointerWidth { address } => {
///             eprintln!("address {:#x} does not fit in 48 bits", address);
///         }
///         HeaderError::TagRange { raw } => {
///             eprintln!("unknown type tag {}", raw);
///         }
///         _ => {
///             eprintln!("Other error: {}", err);
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Pointer-width violation
    ///
    /// **When returned:** An address has any of bits 48-63 set
    ///
    /// **Recovery strategy:** Cannot recover - storing it would overwrite
    /// the mark bit and the type tag
    #[error("Pointer-width violation: address {address:#018x} does not fit in 48 bits")]
    PointerWidth { address: u64 },

    /// Tag-range violation
    ///
    /// **When returned:** A decoded type tag is not a known object kind
    ///
    /// **Recovery strategy:** Cannot recover - the header is corrupted
    #[error("Tag-range violation: type tag {raw} is not a known object kind")]
    TagRange { raw: u8 },

    /// Reserved bits set
    ///
    /// **When returned:** A raw word handed to `Header::from_bits` has
    /// padding bits 49-55 set
    #[error("Reserved header bits set: {bits:#018x}")]
    ReservedBits { bits: u64 },

    /// Alignment error
    ///
    /// **When returned:** An object pushed onto an `ObjectList` is not
    /// aligned to the configured heap alignment
    #[error("Alignment error: address {address:#x} is not aligned to {alignment} bytes")]
    Misaligned { address: u64, alignment: usize },

    /// Atomic update failed
    ///
    /// **When returned:** Compare-and-swap on an `AtomicHeader` observed a
    /// different word than expected
    ///
    /// **Recovery strategy:** Retry with the returned current word
    #[error("Atomic update failed: expected value changed during CAS operation, current={current:#x}")]
    AtomicUpdateFailed { current: u64 },

    /// Configuration error
    ///
    /// **When returned:** `HeaderConfig::validate` rejects a parameter
    ///
    /// **Recovery strategy:** Use default configuration or fail fast
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Snapshot error
    ///
    /// **When returned:** A heap snapshot fails to parse, or its entries
    /// disagree with their raw words or with each other
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl HeaderError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HeaderError::AtomicUpdateFailed { .. } | HeaderError::Configuration(_)
        )
    }

    /// Check if this error indicates a broken invariant
    pub fn is_bug(&self) -> bool {
        matches!(
            self,
            HeaderError::PointerWidth { .. }
                | HeaderError::TagRange { .. }
                | HeaderError::ReservedBits { .. }
                | HeaderError::Misaligned { .. }
        )
    }

    /// Short name of the invariant this error reports
    pub fn invariant(&self) -> &'static str {
        match self {
            HeaderError::PointerWidth { .. } => "pointer-width",
            HeaderError::TagRange { .. } => "tag-range",
            HeaderError::ReservedBits { .. } => "reserved-bits",
            HeaderError::Misaligned { .. } => "alignment",
            HeaderError::AtomicUpdateFailed { .. } => "atomic-update",
            HeaderError::Configuration(_) => "configuration",
            HeaderError::Snapshot(_) => "snapshot",
        }
    }
}

/// Result type alias for header operations
pub type Result<T> = std::result::Result<T, HeaderError>;

/// Report an unrecoverable invariant violation and abort the operation.
///
/// Logs the diagnostic through the `log` facade before panicking so that
/// a crash report carries the failing invariant even when the panic
/// message is swallowed.
#[cold]
#[track_caller]
pub fn violation(err: HeaderError) -> ! {
    log::error!("header invariant violated ({}): {}", err.invariant(), err);
    panic!("header invariant violated ({}): {}", err.invariant(), err);
}

/// Ensure condition is true, otherwise return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
