// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle and flag types.

/// Identifier for an item in the tree (generational).
///
/// The index names an arena slot; the generation changes every time the slot is reused,
/// so a handle to a removed item never resolves to its replacement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

impl ItemId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    /// The arena slot this item occupies.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// How many times the slot had been handed out when this item was created.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-item state maintained by the filter pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item is shown under the current filter.
        const VISIBLE = 0b0000_0001;
        /// The item's own title contains the current filter text.
        const MATCHES_FILTER = 0b0000_0010;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Traversal direction through sibling lists and leaf order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards next siblings and later leaves.
    Forward,
    /// Towards previous siblings and earlier leaves.
    Backward,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}
