// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item representation: the common header plus the folder or leaf payload.

use core::fmt;

use crate::text::Title;
use crate::types::{ItemFlags, ItemId};

/// Callback run when a leaf commits a value.
pub type ChangeCallback<'a> = &'a dyn Fn(&ItemChange<'_>);

/// What a [`ChangeCallback`] is told about a commit.
#[derive(Clone, Copy, Debug)]
pub struct ItemChange<'c> {
    /// The committing leaf.
    pub item: ItemId,
    /// The leaf's stored title.
    pub title: &'c str,
    /// Position of the committed value in the leaf's value list.
    pub value_index: usize,
    /// Bytes of the committed element in the caller's values buffer.
    pub value: &'c [u8],
    /// Display string of the committed value.
    pub value_title: &'c str,
    /// The caller's token for this item.
    pub user_data: u64,
}

/// A group of `(path, value title)` pairs applied together when a preset leaf commits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Preset<'a> {
    /// Paths of the leaves to set.
    pub paths: &'a [&'a str],
    /// Value title to apply to each path, pairwise with `paths`.
    pub value_titles: &'a [&'a str],
}

impl<'a> Preset<'a> {
    /// Iterates the `(path, value title)` pairs.
    pub fn entries(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.paths
            .iter()
            .copied()
            .zip(self.value_titles.iter().copied())
    }
}

/// Folder payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FolderData {
    /// Head of the child list.
    pub(crate) first_child: Option<ItemId>,
    /// Child last visited by the cursor.
    pub(crate) hot_child: Option<ItemId>,
}

impl FolderData {
    /// Head of the child list.
    pub const fn first_child(&self) -> Option<ItemId> {
        self.first_child
    }

    /// Child the cursor returns to when entering this folder.
    pub const fn hot_child(&self) -> Option<ItemId> {
        self.hot_child
    }
}

/// Leaf payload: a settable value chosen from a list.
///
/// The leaf does not own its values. `values` aliases a caller buffer holding
/// `num_values()` elements of `element_size` bytes each.
#[derive(Clone, Copy, Default)]
pub struct LeafData<'a> {
    /// Longer help text shown while the leaf is expanded.
    pub description: &'a str,
    /// The value list is expanded for editing.
    pub is_active: bool,
    /// Highlighted value.
    pub hot_index: usize,
    /// Last committed value.
    pub active_index: usize,
    /// Value considered unchanged; anything else is an override.
    pub default_index: usize,
    /// Display string per value.
    pub value_titles: &'a [&'a str],
    /// Caller-owned value storage.
    pub values: &'a [u8],
    /// Size of one element of `values` in bytes.
    pub element_size: usize,
    /// Run on every commit.
    pub on_item_changed: Option<ChangeCallback<'a>>,
    /// Saved value title waiting for the leaf to receive its values.
    pub pending_value: Option<&'a str>,
    /// Settings applied when this leaf commits.
    pub preset: Option<Preset<'a>>,
}

impl<'a> LeafData<'a> {
    /// A leaf choosing among `value_titles`, backed by `values` in `element_size` chunks.
    pub fn new(value_titles: &'a [&'a str], values: &'a [u8], element_size: usize) -> Self {
        Self {
            value_titles,
            values,
            element_size,
            ..Self::default()
        }
    }

    /// Number of selectable values.
    pub const fn num_values(&self) -> usize {
        self.value_titles.len()
    }

    /// Bytes of value `index`, or an empty slice when the buffer does not cover it.
    pub fn value(&self, index: usize) -> &'a [u8] {
        let start = index * self.element_size;
        self.values
            .get(start..start + self.element_size)
            .unwrap_or_default()
    }

    /// Display string of value `index`.
    pub fn value_title(&self, index: usize) -> Option<&'a str> {
        self.value_titles.get(index).copied()
    }

    /// Position of the value displayed as `title`.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.value_titles.iter().position(|t| *t == title)
    }

    /// Clamps the hot/active/default indices into the value range.
    pub fn clamp_indices(&mut self) {
        let last = self.num_values().saturating_sub(1);
        self.hot_index = self.hot_index.min(last);
        self.active_index = self.active_index.min(last);
        self.default_index = self.default_index.min(last);
        if self.num_values() == 0 {
            self.is_active = false;
        }
    }

    /// Returns `true` if the committed value differs from the default.
    pub const fn is_overridden(&self) -> bool {
        self.num_values() > 0 && self.active_index != self.default_index
    }
}

impl fmt::Debug for LeafData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafData")
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .field("hot_index", &self.hot_index)
            .field("active_index", &self.active_index)
            .field("default_index", &self.default_index)
            .field("value_titles", &self.value_titles)
            .field("values", &self.values.len())
            .field("element_size", &self.element_size)
            .field("on_item_changed", &self.on_item_changed.is_some())
            .field("pending_value", &self.pending_value)
            .field("preset", &self.preset)
            .finish()
    }
}

/// The two item shapes.
#[derive(Clone, Copy, Debug)]
pub enum ItemKind<'a> {
    /// A container of other items.
    Folder(FolderData),
    /// A settable value.
    Leaf(LeafData<'a>),
}

/// A node of the menu tree.
///
/// Links are arena handles; the arena owns every item.
#[derive(Clone, Copy, Debug)]
pub struct Item<'a> {
    pub(crate) title: Title,
    pub(crate) parent: Option<ItemId>,
    pub(crate) prev_sibling: Option<ItemId>,
    pub(crate) next_sibling: Option<ItemId>,
    pub(crate) flags: ItemFlags,
    /// Caller-defined token handed back in [`ItemChange::user_data`].
    pub user_data: u64,
    pub(crate) kind: ItemKind<'a>,
}

impl<'a> Item<'a> {
    pub(crate) fn folder(title: Title) -> Self {
        Self::with_kind(title, ItemKind::Folder(FolderData::default()))
    }

    pub(crate) fn leaf(title: Title) -> Self {
        Self::with_kind(title, ItemKind::Leaf(LeafData::default()))
    }

    fn with_kind(title: Title, kind: ItemKind<'a>) -> Self {
        Self {
            title,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            flags: ItemFlags::default(),
            user_data: 0,
            kind,
        }
    }

    /// The stored (possibly truncated) title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The title with its truncation state.
    pub const fn full_title(&self) -> &Title {
        &self.title
    }

    /// Owning folder; `None` only for the root.
    pub const fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Next item in the parent's child list.
    pub const fn next_sibling(&self) -> Option<ItemId> {
        self.next_sibling
    }

    /// Previous item in the parent's child list.
    pub const fn prev_sibling(&self) -> Option<ItemId> {
        self.prev_sibling
    }

    /// Filter state.
    pub const fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// The payload.
    pub const fn kind(&self) -> &ItemKind<'a> {
        &self.kind
    }

    /// Returns `true` for folders.
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder(_))
    }

    /// Folder payload, if this is a folder.
    pub const fn as_folder(&self) -> Option<&FolderData> {
        match &self.kind {
            ItemKind::Folder(folder) => Some(folder),
            ItemKind::Leaf(_) => None,
        }
    }

    /// Leaf payload, if this is a leaf.
    pub const fn as_leaf(&self) -> Option<&LeafData<'a>> {
        match &self.kind {
            ItemKind::Leaf(leaf) => Some(leaf),
            ItemKind::Folder(_) => None,
        }
    }

    /// Mutable leaf payload, if this is a leaf.
    pub fn as_leaf_mut(&mut self) -> Option<&mut LeafData<'a>> {
        match &mut self.kind {
            ItemKind::Leaf(leaf) => Some(leaf),
            ItemKind::Folder(_) => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut FolderData> {
        match &mut self.kind {
            ItemKind::Folder(folder) => Some(folder),
            ItemKind::Leaf(_) => None,
        }
    }

    /// First child, for folders.
    pub fn first_child(&self) -> Option<ItemId> {
        self.as_folder().and_then(FolderData::first_child)
    }

    /// Returns `true` for a leaf that only remembers a loaded value and has no values yet.
    pub fn is_placeholder(&self) -> bool {
        self.as_leaf()
            .is_some_and(|leaf| leaf.num_values() == 0 && leaf.pending_value.is_some())
    }

    /// Returns `true` if the item passes the current filter and is not a placeholder.
    pub fn is_shown(&self) -> bool {
        self.flags.contains(ItemFlags::VISIBLE) && !self.is_placeholder()
    }
}
