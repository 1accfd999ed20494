//! Configuration Module - Header and list checking parameters
//!
//! The codec itself has no knobs; these settings control how strictly the
//! list layer checks the objects handed to it.

use crate::error::{HeaderError, Result};
use crate::object::layout::OBJECT_ALIGNMENT;

/// Configuration for [`ObjectList`](crate::object::ObjectList)
///
/// # Examples
///
/// ```rust
/// use gchdr::HeaderConfig;
///
/// let config = HeaderConfig::default();
/// assert!(config.validate().is_ok());
///
/// // Heap that hands out 16-byte aligned objects, with per-object tracing
/// let config = HeaderConfig {
///     alignment: 16,
///     trace_mutations: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Alignment guaranteed by the allocator, in bytes
    ///
    /// Must be a power of two and at least 8.
    /// Default: 8
    pub alignment: usize,

    /// Reject objects whose address is not aligned to `alignment`
    ///
    /// Default: true
    pub verify_alignment: bool,

    /// Emit a `log::trace!` record for every header write made by the list
    ///
    /// Default: false
    pub trace_mutations: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            alignment: OBJECT_ALIGNMENT,
            verify_alignment: true,
            trace_mutations: false,
        }
    }
}

impl HeaderConfig {
    /// Largest accepted alignment (one page)
    pub const MAX_ALIGNMENT: usize = 4096;

    /// Validate configuration
    ///
    /// # Returns
    /// `Ok(())` if valid, `Err(HeaderError::Configuration)` otherwise
    pub fn validate(&self) -> Result<()> {
        if !self.alignment.is_power_of_two() {
            return Err(HeaderError::Configuration(format!(
                "alignment ({}) must be a power of two",
                self.alignment
            )));
        }

        if self.alignment < OBJECT_ALIGNMENT {
            return Err(HeaderError::Configuration(format!(
                "alignment ({}) must be at least {} bytes",
                self.alignment, OBJECT_ALIGNMENT
            )));
        }

        if self.alignment > Self::MAX_ALIGNMENT {
            return Err(HeaderError::Configuration(format!(
                "alignment ({}) must not exceed {} bytes",
                self.alignment,
                Self::MAX_ALIGNMENT
            )));
        }

        Ok(())
    }
}
