// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity slot storage with a LIFO free list.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;
use core::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::item::Item;
use crate::types::ItemId;

/// Number of released slots the free list can hold.
pub const FREE_LIST_CAPACITY: usize = 256;

/// Capacity failures. Both indicate an undersized configuration in the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// Every slot is live and nothing has been released.
    #[error("item arena exhausted: all {capacity} slots are in use")]
    Exhausted {
        /// Number of slots in the arena.
        capacity: usize,
    },
    /// The free list cannot take another released slot.
    #[error("free list full: {capacity} released slots are already queued for reuse")]
    FreeListFull {
        /// Free list capacity.
        capacity: usize,
    },
}

/// One arena cell.
///
/// Callers providing their own storage fill a buffer with [`Slot::VACANT`].
#[derive(Clone, Copy, Debug)]
pub struct Slot<'a> {
    generation: u32,
    item: Option<Item<'a>>,
}

impl Slot<'_> {
    /// An unused slot.
    pub const VACANT: Self = Self {
        generation: 0,
        item: None,
    };
}

impl Default for Slot<'_> {
    fn default() -> Self {
        Self::VACANT
    }
}

enum Storage<'a> {
    Borrowed(&'a mut [Slot<'a>]),
    Owned(Box<[Slot<'a>]>),
}

impl<'a> Deref for Storage<'a> {
    type Target = [Slot<'a>];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(slots) => slots,
            Self::Owned(slots) => slots,
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Borrowed(slots) => slots,
            Self::Owned(slots) => slots,
        }
    }
}

/// Slot storage for every item of one menu.
///
/// The capacity is fixed when the arena is built. [`Arena::acquire`] hands out the most
/// recently released slot first and only then advances the high-water mark; slots are never
/// moved or compacted, so an index stays valid for as long as its item lives.
pub struct Arena<'a> {
    slots: Storage<'a>,
    high_water: usize,
    free_list: SmallVec<[u32; FREE_LIST_CAPACITY]>,
    live: usize,
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("high_water", &self.high_water)
            .field("live", &self.live)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Arena<'a> {
    /// Reserves `capacity` slots up front. This is the only allocation the arena makes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(Storage::Owned(vec![Slot::VACANT; capacity].into_boxed_slice()))
    }

    /// Uses caller-provided slots. Their previous contents are discarded.
    pub fn from_slots(slots: &'a mut [Slot<'a>]) -> Self {
        slots.fill(Slot::VACANT);
        Self::from_storage(Storage::Borrowed(slots))
    }

    fn from_storage(slots: Storage<'a>) -> Self {
        assert!(
            u32::try_from(slots.len()).is_ok(),
            "arena capacity must fit 32-bit item indices"
        );
        Self {
            slots,
            high_water: 0,
            free_list: SmallVec::new(),
            live: 0,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live items.
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no item is live.
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever handed out.
    pub const fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of released slots waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Stores `item` in a fresh slot, preferring the most recently released one.
    pub fn try_acquire(&mut self, item: Item<'a>) -> Result<ItemId, ArenaError> {
        let idx = match self.free_list.pop() {
            Some(idx) => idx as usize,
            None => {
                if self.high_water == self.slots.len() {
                    return Err(ArenaError::Exhausted {
                        capacity: self.slots.len(),
                    });
                }
                self.high_water += 1;
                self.high_water - 1
            }
        };
        let slot = &mut self.slots[idx];
        slot.generation = slot.generation.wrapping_add(1);
        slot.item = Some(item);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Capacity is checked against u32 at construction."
        )]
        let id = ItemId::new(idx as u32, slot.generation);
        self.live += 1;
        Ok(id)
    }

    /// Like [`Arena::try_acquire`], but running out of slots is fatal.
    ///
    /// # Panics
    ///
    /// Panics when the arena is exhausted.
    pub fn acquire(&mut self, item: Item<'a>) -> ItemId {
        match self.try_acquire(item) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Frees the slot of `id` for reuse. Releasing a stale id does nothing.
    pub fn try_release(&mut self, id: ItemId) -> Result<(), ArenaError> {
        if !self.is_alive(id) {
            return Ok(());
        }
        if self.free_list.len() == FREE_LIST_CAPACITY {
            return Err(ArenaError::FreeListFull {
                capacity: FREE_LIST_CAPACITY,
            });
        }
        self.slots[id.index()].item = None;
        self.free_list.push(id.0);
        self.live -= 1;
        Ok(())
    }

    /// Like [`Arena::try_release`], but a full free list is fatal.
    ///
    /// # Panics
    ///
    /// Panics when the free list is full.
    pub fn release(&mut self, id: ItemId) {
        if let Err(err) = self.try_release(id) {
            panic!("{err}");
        }
    }

    /// Returns `true` if `id` refers to a live item.
    pub fn is_alive(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// The item behind `id`, or `None` if it is stale.
    pub fn get(&self, id: ItemId) -> Option<&Item<'a>> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.item.as_ref()
    }

    /// Mutable access to the item behind `id`, or `None` if it is stale.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item<'a>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.item.as_mut()
    }

    /// Iterates live items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item<'a>)> + '_ {
        self.slots[..self.high_water]
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let item = slot.item.as_ref()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Capacity is checked against u32 at construction."
                )]
                let id = ItemId::new(idx as u32, slot.generation);
                Some((id, item))
            })
    }
}
