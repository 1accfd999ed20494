//! Heap snapshots
//!
//! Decoded, serializable views of header words for debuggers and for
//! persisted heap dumps. Each entry keeps the raw word alongside the
//! decoded fields so a reader can re-check the layout.

use serde::{Deserialize, Serialize};

use crate::error::{HeaderError, Result};
use crate::object::{Address, Header, TypeTag};

/// Layout identifier written into every snapshot
pub const LAYOUT: &str = "tag-high/56:8,mark:48,addr:0-47";

/// One object's header, decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSnapshot {
    /// Address of the object (and of its header)
    pub address: u64,
    /// Raw header word
    pub raw: u64,
    pub type_tag: u8,
    pub type_name: String,
    pub marked: bool,
    pub next: u64,
}

impl HeaderSnapshot {
    pub fn capture<T: TypeTag>(address: Address, header: Header<T>) -> Self {
        let type_name = match header.try_get_type() {
            Ok(tag) => tag.name().to_string(),
            Err(_) => format!("<invalid {}>", header.raw_type()),
        };
        Self {
            address: address.get(),
            raw: header.to_bits(),
            type_tag: header.raw_type(),
            type_name,
            marked: header.is_marked(),
            next: header.get_next().get(),
        }
    }

    /// Rebuild the header, checking that the decoded fields agree with
    /// the raw word.
    pub fn decode<T: TypeTag>(&self) -> Result<Header<T>> {
        let header = Header::<T>::from_bits(self.raw)?;
        if header.raw_type() != self.type_tag
            || header.is_marked() != self.marked
            || header.get_next().get() != self.next
        {
            return Err(HeaderError::Snapshot(format!(
                "fields of object {:#x} disagree with raw word {:#018x}",
                self.address, self.raw
            )));
        }
        Ok(header)
    }
}

/// Every header of an object list, in list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapSnapshot {
    pub layout: String,
    pub head: u64,
    pub objects: Vec<HeaderSnapshot>,
}

impl HeapSnapshot {
    pub fn new(head: Address, objects: Vec<HeaderSnapshot>) -> Self {
        Self {
            layout: LAYOUT.to_string(),
            head: head.get(),
            objects,
        }
    }

    pub fn marked_count(&self) -> usize {
        self.objects.iter().filter(|o| o.marked).count()
    }

    /// Check that the entries form one chain starting at `head` and
    /// ending in a null next address.
    pub fn verify_links(&self) -> Result<()> {
        if self.layout != LAYOUT {
            return Err(HeaderError::Snapshot(format!(
                "unsupported layout '{}'",
                self.layout
            )));
        }

        let mut expected = self.head;
        for object in &self.objects {
            if object.address != expected {
                return Err(HeaderError::Snapshot(format!(
                    "broken chain: expected object {:#x}, found {:#x}",
                    expected, object.address
                )));
            }
            expected = object.next;
        }

        if expected != 0 {
            return Err(HeaderError::Snapshot(format!(
                "chain continues past the last entry to {:#x}",
                expected
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HeaderError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HeaderError::Snapshot(e.to_string()))
    }
}
