//! Masked Bit-Field Access
//!
//! A single 64-bit word with masked get/set over arbitrary bit ranges.
//! The field layout (offset + mask pairs) is owned by the caller; a write
//! replaces exactly the bits under `mask << offset` and nothing else.

use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// A 64-bit word with masked field access.
///
/// Callers are responsible for choosing non-overlapping, in-range
/// (0-63) offset/mask pairs. Masked arithmetic cannot fail for legal
/// offsets, so neither accessor has an error path.
#[repr(transparent)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsBytes,
    FromBytes,
    FromZeroes,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct BitField(u64);

impl BitField {
    /// A zeroed word.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wrap a raw 64-bit value verbatim.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Read the field at `offset` under `mask`.
    pub const fn get(self, offset: u32, mask: u64) -> u64 {
        (self.0 >> offset) & mask
    }

    /// Replace the field at `offset` under `mask` with `value`.
    ///
    /// Bits outside `mask << offset` are preserved; `value` is clamped
    /// to the field width by the mask.
    pub fn set(&mut self, offset: u32, mask: u64, value: u64) {
        self.0 = (self.0 & !(mask << offset)) | ((value & mask) << offset);
    }
}
