// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tweakmenu_tree --heading-base-level=0

//! Tweakmenu Tree: the item arena and folder/leaf tree behind a Tweakmenu debug menu.
//!
//! A debug menu is a tree of folders and settable leaves, addressed by `/`-separated paths such
//! as `"Rendering/Shadows/Enabled"`. This crate owns the data side of that tree:
//!
//! - [`Arena`]: fixed-capacity slot storage, either borrowed from the caller or reserved once at
//!   creation. Released slots are reused last-in first-out before the high-water mark advances.
//! - [`Tree`]: parent, child, and sibling links over the arena, path lookup-or-create, and
//!   subtree removal.
//! - Leaf-order traversal ([`Tree::step_leaf`], [`Tree::edge_leaf`], [`Tree::sibling_where`]):
//!   depth-first stepping that wraps around and prunes subtrees a predicate rejects.
//! - [`Filter`] and [`Tree::apply_filter`]: case-sensitive substring filtering that marks
//!   matching items and their ancestors visible.
//!
//! Cursor state, scrolling, animation, and drawing live in the `tweakmenu` crate.
//!
//! ## Handles
//!
//! Items are addressed by [`ItemId`], a generational handle. Removing an item frees its slot for
//! reuse, and the old handle stops resolving instead of aliasing the new occupant.
//!
//! ## Titles
//!
//! Titles are stored inline in [`MAX_TITLE_LENGTH`] bytes (20 with the `compact_titles`
//! feature). Longer titles keep a prefix followed by `".."`, and path lookup still resolves the
//! full original segment.
//!
//! ## Example
//!
//! ```rust
//! use tweakmenu_tree::{Direction, Filter, LeafData, Tree};
//!
//! static ON_OFF: [&str; 2] = ["Off", "On"];
//!
//! let mut tree = Tree::with_capacity(16);
//! for path in ["Audio/Music", "Audio/Effects", "Rendering/Vsync"] {
//!     let leaf = tree.get_or_create(None, path, true).unwrap();
//!     *tree.leaf_mut(leaf).unwrap() = LeafData::new(&ON_OFF, &[0, 1], 1);
//! }
//!
//! // Depth-first leaf order, wrapping at the end.
//! let effects = tree.find("Audio/Effects").unwrap();
//! let vsync = tree.step_leaf(effects, Direction::Forward, |_| true).unwrap();
//! assert_eq!(tree.get(vsync).unwrap().title(), "Vsync");
//!
//! // Filtering hides non-matching branches.
//! let mut filter = Filter::enabled();
//! filter.set_text("Music");
//! assert_eq!(tree.apply_filter(&filter), 1);
//! assert!(!tree.is_shown(vsync));
//! ```
//!
//! This crate is `no_std` and uses `alloc` only when an arena is created by capacity.

#![no_std]

extern crate alloc;

mod arena;
mod filter;
mod item;
mod text;
mod traverse;
mod tree;
mod types;

pub use arena::{Arena, ArenaError, FREE_LIST_CAPACITY, Slot};
pub use filter::{Filter, MAX_FILTER_LENGTH};
pub use item::{ChangeCallback, FolderData, Item, ItemChange, ItemKind, LeafData, Preset};
pub use text::{ELLIPSIS, InlineStr, MAX_TITLE_LENGTH, Title};
pub use tree::{Children, Descendants, PATH_SEPARATOR, ROOT_TITLE, Tree};
pub use types::{Direction, ItemFlags, ItemId};
