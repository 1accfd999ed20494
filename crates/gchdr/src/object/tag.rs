//! Type tags stored in the top byte of the header

use std::fmt::Debug;

/// A set of object kinds that fits in the header's 8-bit tag field.
///
/// `from_raw` returns `None` for bytes outside the enumeration; the header
/// treats that as corruption.
pub trait TypeTag: Copy + Eq + Debug {
    /// Encode as the raw tag byte
    fn to_raw(self) -> u8;

    /// Decode a raw tag byte
    fn from_raw(raw: u8) -> Option<Self>;

    /// Human readable name, used in snapshots and diagnostics
    fn name(self) -> &'static str;
}

/// Heap object kinds of a small dynamic language runtime.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    BoundMethod = 0,
    Class = 1,
    Closure = 2,
    String = 3,
    Function = 4,
    Instance = 5,
    Native = 6,
    Upvalue = 7,
}

impl ObjectKind {
    pub const COUNT: usize = Self::Upvalue as usize + 1;

    pub const ALL: [ObjectKind; Self::COUNT] = [
        ObjectKind::BoundMethod,
        ObjectKind::Class,
        ObjectKind::Closure,
        ObjectKind::String,
        ObjectKind::Function,
        ObjectKind::Instance,
        ObjectKind::Native,
        ObjectKind::Upvalue,
    ];
}

impl TypeTag for ObjectKind {
    #[inline]
    fn to_raw(self) -> u8 {
        self as u8
    }

    #[inline]
    fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    fn name(self) -> &'static str {
        match self {
            ObjectKind::BoundMethod => "bound-method",
            ObjectKind::Class => "class",
            ObjectKind::Closure => "closure",
            ObjectKind::String => "string",
            ObjectKind::Function => "function",
            ObjectKind::Instance => "instance",
            ObjectKind::Native => "native",
            ObjectKind::Upvalue => "upvalue",
        }
    }
}

/// Raw tags: every byte is valid. For runtimes that keep their own tag table.
impl TypeTag for u8 {
    #[inline]
    fn to_raw(self) -> u8 {
        self
    }

    #[inline]
    fn from_raw(raw: u8) -> Option<Self> {
        Some(raw)
    }

    fn name(self) -> &'static str {
        "raw"
    }
}
