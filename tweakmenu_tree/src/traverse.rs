// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf-order traversal.
//!
//! Leaf order is the depth-first, pre-order sequence of leaves below the root. Every walk
//! takes a predicate deciding which items may be entered; a folder failing it is pruned with
//! its whole subtree, and a leaf failing it is skipped.

use crate::item::Item;
use crate::tree::Tree;
use crate::types::{Direction, ItemId};

impl<'a> Tree<'a> {
    /// First sibling of `id` in `direction` accepted by `pred`, without wrapping.
    pub fn sibling_where<F>(&self, id: ItemId, direction: Direction, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        let mut current = self.sibling(id, direction);
        while let Some(c) = current {
            if self.get(c).is_some_and(&pred) {
                return Some(c);
            }
            current = self.sibling(c, direction);
        }
        None
    }

    /// Like [`Tree::sibling_where`], but continues from the other end of the list.
    ///
    /// Returns `id` itself when no other sibling is accepted.
    pub fn wrapping_sibling_where<F>(
        &self,
        id: ItemId,
        direction: Direction,
        pred: F,
    ) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        if let Some(s) = self.sibling_where(id, direction, &pred) {
            return Some(s);
        }
        let parent = self.parent(id)?;
        let edge = self.edge_child(parent, direction)?;
        if self.get(edge).is_some_and(&pred) {
            Some(edge)
        } else {
            self.sibling_where(edge, direction, &pred)
        }
    }

    /// First accepted child of a folder, counted from the `direction` end.
    pub fn edge_child_where<F>(&self, folder: ItemId, direction: Direction, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        let edge = self.edge_child(folder, direction)?;
        if self.get(edge).is_some_and(&pred) {
            Some(edge)
        } else {
            self.sibling_where(edge, direction, &pred)
        }
    }

    /// The first accepted leaf at or below `start` in `direction`.
    ///
    /// A leaf returns itself; a folder is searched from its `direction` end.
    pub fn edge_leaf<F>(&self, start: ItemId, direction: Direction, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        let item = self.get(start)?;
        if !item.is_folder() {
            return pred(item).then_some(start);
        }
        self.edge_leaf_within(start, direction, &pred)
    }

    fn edge_leaf_within<F>(&self, folder: ItemId, direction: Direction, pred: &F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        let mut child = self.edge_child(folder, direction);
        while let Some(c) = child {
            if let Some(item) = self.get(c)
                && pred(item)
            {
                if !item.is_folder() {
                    return Some(c);
                }
                if let Some(leaf) = self.edge_leaf_within(c, direction, pred) {
                    return Some(leaf);
                }
            }
            child = self.sibling(c, direction);
        }
        None
    }

    /// The accepted leaf after (or before) `from` in leaf order, wrapping at the ends.
    ///
    /// `from` may be a folder: stepping forward from a folder enters its own subtree first,
    /// stepping backward continues with whatever precedes it. Returns `from` when it is the
    /// only accepted leaf and `None` when there is none at all.
    pub fn step_leaf<F>(&self, from: ItemId, direction: Direction, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        let item = self.get(from)?;
        if item.is_folder()
            && direction == Direction::Forward
            && let Some(leaf) = self.edge_leaf_within(from, direction, &pred)
        {
            return Some(leaf);
        }

        let mut node = from;
        loop {
            let mut sibling = self.sibling(node, direction);
            while let Some(s) = sibling {
                if let Some(leaf) = self.edge_leaf(s, direction, &pred) {
                    return Some(leaf);
                }
                sibling = self.sibling(s, direction);
            }
            match self.parent(node) {
                Some(parent) if parent != self.root() => node = parent,
                _ => break,
            }
        }
        self.edge_leaf_within(self.root(), direction, &pred)
    }

    /// First accepted leaf of the whole tree.
    pub fn first_leaf<F>(&self, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        self.edge_leaf_within(self.root(), Direction::Forward, &pred)
    }

    /// Last accepted leaf of the whole tree.
    pub fn last_leaf<F>(&self, pred: F) -> Option<ItemId>
    where
        F: Fn(&Item<'a>) -> bool,
    {
        self.edge_leaf_within(self.root(), Direction::Backward, &pred)
    }

    /// Number of accepted leaves, pruning rejected folders.
    pub fn count_leaves<F>(&self, pred: F) -> usize
    where
        F: Fn(&Item<'a>) -> bool,
    {
        self.count_leaves_within(self.root(), &pred)
    }

    fn count_leaves_within<F>(&self, folder: ItemId, pred: &F) -> usize
    where
        F: Fn(&Item<'a>) -> bool,
    {
        self.children(folder)
            .filter_map(|c| Some((c, self.get(c)?)))
            .filter(|(_, item)| pred(item))
            .map(|(c, item)| {
                if item.is_folder() {
                    self.count_leaves_within(c, pred)
                } else {
                    1
                }
            })
            .sum()
    }
}
