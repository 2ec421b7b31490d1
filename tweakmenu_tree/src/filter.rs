// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text filter and visibility marking.

use crate::item::Item;
use crate::text::InlineStr;
use crate::tree::Tree;
use crate::types::{Direction, ItemFlags, ItemId};

/// Maximum filter text length in bytes.
pub const MAX_FILTER_LENGTH: usize = 64;

/// Case-sensitive substring filter.
///
/// A disabled filter and an enabled filter with empty text both show everything; they differ
/// only in whether the host displays the filter bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    text: InlineStr<MAX_FILTER_LENGTH>,
    enabled: bool,
}

impl Filter {
    /// An enabled filter with empty text.
    pub fn enabled() -> Self {
        Self {
            text: InlineStr::new(),
            enabled: true,
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns `true` if filtering is switched on.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the filter hides anything.
    pub const fn is_active(&self) -> bool {
        self.enabled && !self.text.is_empty()
    }

    /// Switches filtering on or off. Switching it off clears the text.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.text.clear();
        }
    }

    /// Replaces the text, truncating at a character boundary when it is too long.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Appends typed text. Returns `false` if some of it did not fit.
    pub fn push_str(&mut self, text: &str) -> bool {
        self.text.push_str(text)
    }

    /// Removes the last character. On empty text this disables the filter instead.
    pub fn backspace(&mut self) {
        if self.text.pop().is_none() {
            self.enabled = false;
        }
    }

    /// Returns `true` if `title` passes the filter.
    pub fn matches(&self, title: &str) -> bool {
        !self.is_active() || title.contains(self.text())
    }
}

impl Tree<'_> {
    /// Recomputes [`ItemFlags::VISIBLE`] and [`ItemFlags::MATCHES_FILTER`] for every item.
    ///
    /// An item is visible when its own title matches or it has a matching descendant leaf.
    /// A folder that matches only by its own title does not reveal its children, and a folder
    /// holding only placeholders is hidden. The root is always visible. Returns the number of visible leaves.
    pub fn apply_filter(&mut self, filter: &Filter) -> usize {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("apply_filter", text = filter.text()).entered();

        let root = self.root();
        let (leaves, _) = self.mark(root, filter);
        if let Some(item) = self.get_mut(root) {
            item.flags.insert(ItemFlags::VISIBLE);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(visible_leaves = leaves, "filter applied");

        leaves
    }

    /// Marks `id` and its subtree. Returns how many leaves at or below `id` are visible, and
    /// whether the subtree holds nothing but placeholders.
    ///
    /// A folder whose children are all placeholders (directly or through such folders) stays
    /// hidden until one of them is defined.
    fn mark(&mut self, id: ItemId, filter: &Filter) -> (usize, bool) {
        let Some(item) = self.get(id) else {
            return (0, false);
        };
        let own_match = filter.is_active() && item.title().contains(filter.text());
        let passes = filter.matches(item.title());
        let is_folder = item.is_folder();
        let placeholder = item.is_placeholder();

        let (visible, leaves, phantom) = if is_folder {
            let mut leaves = 0;
            let mut children = 0;
            let mut phantom_children = 0;
            let mut child = self.first_child(id);
            while let Some(c) = child {
                child = self.sibling(c, Direction::Forward);
                let (below, phantom) = self.mark(c, filter);
                leaves += below;
                children += 1;
                phantom_children += usize::from(phantom);
            }
            let phantom = children > 0 && phantom_children == children;
            (leaves > 0 || (passes && !phantom), leaves, phantom)
        } else {
            let leaves = usize::from(passes && !placeholder);
            (passes, leaves, placeholder)
        };

        if let Some(item) = self.get_mut(id) {
            item.flags.set(ItemFlags::VISIBLE, visible);
            item.flags.set(ItemFlags::MATCHES_FILTER, own_match);
        }
        (leaves, phantom)
    }

    /// Returns `true` if `id` is shown under the last applied filter.
    pub fn is_shown(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(Item::is_shown)
    }
}
