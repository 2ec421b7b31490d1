// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree structure over the arena: linkage, path lookup, and removal.

use core::fmt::Write as _;

use smallvec::SmallVec;

use crate::arena::{Arena, ArenaError, FREE_LIST_CAPACITY, Slot};
use crate::item::{FolderData, Item, ItemKind, LeafData};
use crate::text::{InlineStr, Title};
use crate::types::{Direction, ItemId};

/// Title of the implicit root folder.
pub const ROOT_TITLE: &str = "Menu Root";

/// Path separator.
pub const PATH_SEPARATOR: char = '/';

/// The menu tree: a root folder plus every item reachable from it, all stored in one [`Arena`].
///
/// Children of a folder form a doubly-linked list in insertion order, so unlinking is O(1)
/// and both leaf-order directions can be walked without extra storage.
///
/// ## Example
///
/// ```rust
/// use tweakmenu_tree::Tree;
///
/// let mut tree = Tree::with_capacity(16);
/// let flag = tree.get_or_create(None, "Rendering/Shadows/Enabled", true).unwrap();
///
/// // Intermediate segments became folders.
/// let shadows = tree.find("Rendering/Shadows").unwrap();
/// assert!(tree.get(shadows).unwrap().is_folder());
///
/// // Looking the same path up again yields the same item.
/// assert_eq!(tree.find("Rendering/Shadows/Enabled"), Some(flag));
/// ```
pub struct Tree<'a> {
    arena: Arena<'a>,
    root: ItemId,
}

impl core::fmt::Debug for Tree<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("arena", &self.arena)
            .finish()
    }
}

impl<'a> Tree<'a> {
    /// Builds a tree in a freshly reserved arena of `capacity` slots (one of which is the root).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Arena::with_capacity(capacity))
    }

    /// Builds a tree in caller-provided slots (one of which is the root).
    pub fn from_slots(slots: &'a mut [Slot<'a>]) -> Self {
        Self::new(Arena::from_slots(slots))
    }

    /// Builds a tree in `arena`, placing the root folder in its first free slot.
    ///
    /// # Panics
    ///
    /// Panics if the arena has no room for the root.
    pub fn new(mut arena: Arena<'a>) -> Self {
        let root = arena.acquire(Item::folder(Title::new(ROOT_TITLE)));
        Self { arena, root }
    }

    /// The root folder. It is never removed and never drawn.
    pub const fn root(&self) -> ItemId {
        self.root
    }

    /// The backing arena.
    pub const fn arena(&self) -> &Arena<'a> {
        &self.arena
    }

    /// Returns `true` if `id` refers to a live item.
    pub fn is_alive(&self, id: ItemId) -> bool {
        self.arena.is_alive(id)
    }

    /// The item behind `id`.
    pub fn get(&self, id: ItemId) -> Option<&Item<'a>> {
        self.arena.get(id)
    }

    /// Mutable access to the item behind `id`. Structural links are not reachable through it.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item<'a>> {
        self.arena.get_mut(id)
    }

    /// Leaf payload of `id`.
    pub fn leaf(&self, id: ItemId) -> Option<&LeafData<'a>> {
        self.get(id)?.as_leaf()
    }

    /// Mutable leaf payload of `id`.
    pub fn leaf_mut(&mut self, id: ItemId) -> Option<&mut LeafData<'a>> {
        self.get_mut(id)?.as_leaf_mut()
    }

    /// Folder payload of `id`.
    pub fn folder(&self, id: ItemId) -> Option<&FolderData> {
        self.get(id)?.as_folder()
    }

    /// Parent of `id`; `None` for the root or stale ids.
    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.get(id)?.parent
    }

    /// Adjacent sibling of `id` in `direction`, without wrapping.
    pub fn sibling(&self, id: ItemId, direction: Direction) -> Option<ItemId> {
        let item = self.get(id)?;
        match direction {
            Direction::Forward => item.next_sibling,
            Direction::Backward => item.prev_sibling,
        }
    }

    /// First child of a folder.
    pub fn first_child(&self, id: ItemId) -> Option<ItemId> {
        self.get(id)?.first_child()
    }

    /// Last child of a folder. Walks the child list.
    pub fn last_child(&self, id: ItemId) -> Option<ItemId> {
        let mut child = self.first_child(id)?;
        while let Some(next) = self.sibling(child, Direction::Forward) {
            child = next;
        }
        Some(child)
    }

    /// Child at the `direction` end of a folder's list.
    pub fn edge_child(&self, id: ItemId, direction: Direction) -> Option<ItemId> {
        match direction {
            Direction::Forward => self.first_child(id),
            Direction::Backward => self.last_child(id),
        }
    }

    /// Iterates the children of a folder in order. Empty for leaves and stale ids.
    pub fn children(&self, id: ItemId) -> Children<'_, 'a> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Number of ancestors between `id` and the root. Top-level items have depth 0.
    pub fn depth(&self, id: ItemId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == self.root {
                break;
            }
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Returns `true` if `id` is `ancestor` or lies in its subtree.
    pub fn is_within(&self, id: ItemId, ancestor: ItemId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Marks `child` as the folder's remembered cursor position.
    pub fn set_hot_child(&mut self, folder: ItemId, child: Option<ItemId>) {
        if let Some(f) = self.get_mut(folder).and_then(Item::as_folder_mut) {
            f.hot_child = child;
        }
    }

    /// Retitles an item.
    pub fn set_title(&mut self, id: ItemId, title: &str) {
        if let Some(item) = self.get_mut(id) {
            item.title = Title::new(title);
        }
    }

    /// Child of `folder` whose title matches `segment`.
    pub fn find_child(&self, folder: ItemId, segment: &str) -> Option<ItemId> {
        self.children(folder)
            .find(|&child| self.get(child).is_some_and(|c| c.title.matches_segment(segment)))
    }

    /// Resolves a `/`-separated path from the root.
    pub fn find(&self, path: &str) -> Option<ItemId> {
        let mut current = self.root;
        for segment in path.split(PATH_SEPARATOR) {
            current = self.find_child(current, segment)?;
        }
        Some(current)
    }

    /// Resolves `path` below `parent` (the root when `None`), optionally creating what is missing.
    ///
    /// Missing intermediate segments become folders and a missing final segment becomes an
    /// empty leaf for the caller to fill in. Returns `None` when the path does not exist and
    /// `create_if_missing` is false, or when an intermediate segment names a leaf that already
    /// has values. A valueless leaf in an intermediate position is turned into a folder.
    ///
    /// # Panics
    ///
    /// Panics if creation needs more slots than the arena has left.
    pub fn get_or_create(
        &mut self,
        parent: Option<ItemId>,
        path: &str,
        create_if_missing: bool,
    ) -> Option<ItemId> {
        let mut current = parent.unwrap_or(self.root);
        if !self.get(current)?.is_folder() {
            return None;
        }
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();
            let found = self.find_child(current, segment);
            current = match (found, is_last) {
                (Some(child), true) => child,
                (Some(child), false) => {
                    if !self.ensure_folder(child) {
                        return None;
                    }
                    child
                }
                (None, _) if !create_if_missing => return None,
                (None, true) => self.append(current, Item::leaf(Title::new(segment))),
                (None, false) => self.append(current, Item::folder(Title::new(segment))),
            };
        }
        Some(current)
    }

    /// Turns a childless, valueless leaf into a folder. Returns `true` if `id` is a folder after.
    pub fn ensure_folder(&mut self, id: ItemId) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        match &item.kind {
            ItemKind::Folder(_) => true,
            ItemKind::Leaf(leaf) if leaf.num_values() == 0 => {
                item.kind = ItemKind::Folder(FolderData::default());
                true
            }
            ItemKind::Leaf(_) => false,
        }
    }

    /// Turns a childless folder into an empty leaf. Returns `true` if `id` is a leaf after.
    pub fn ensure_leaf(&mut self, id: ItemId) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        match &item.kind {
            ItemKind::Leaf(_) => true,
            ItemKind::Folder(folder) if folder.first_child.is_none() => {
                item.kind = ItemKind::Leaf(LeafData::default());
                true
            }
            ItemKind::Folder(_) => false,
        }
    }

    /// Appends `item` at the tail of `parent`'s child list.
    fn append(&mut self, parent: ItemId, mut item: Item<'a>) -> ItemId {
        let last = self.last_child(parent);
        item.parent = Some(parent);
        item.prev_sibling = last;
        let id = self.arena.acquire(item);
        match last {
            Some(last) => {
                if let Some(l) = self.get_mut(last) {
                    l.next_sibling = Some(id);
                }
            }
            None => {
                if let Some(f) = self.get_mut(parent).and_then(Item::as_folder_mut) {
                    f.first_child = Some(id);
                }
            }
        }
        id
    }

    /// Unlinks `id` and releases it together with its whole subtree.
    ///
    /// The parent's `first_child` and `hot_child` are fixed up; the remembered cursor moves to
    /// the next sibling, else the previous one. Removing the root or a stale id does nothing.
    ///
    /// # Panics
    ///
    /// Panics if the free list cannot take every released slot. The check happens before
    /// anything is unlinked, so the tree is unchanged when it fires.
    pub fn remove(&mut self, id: ItemId) {
        if id == self.root {
            return;
        }
        let Some(item) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (item.parent, item.prev_sibling, item.next_sibling);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("tree_remove", index = id.index()).entered();

        // Nothing may be unlinked unless every slot of the subtree can be released.
        if self.arena.free_count() + self.subtree_len(id) > FREE_LIST_CAPACITY {
            panic!(
                "{}",
                ArenaError::FreeListFull {
                    capacity: FREE_LIST_CAPACITY
                }
            );
        }

        match prev {
            Some(prev) => {
                if let Some(p) = self.get_mut(prev) {
                    p.next_sibling = next;
                }
            }
            None => {
                if let Some(f) = parent.and_then(|p| self.get_mut(p)?.as_folder_mut()) {
                    f.first_child = next;
                }
            }
        }
        if let Some(n) = next.and_then(|n| self.get_mut(n)) {
            n.prev_sibling = prev;
        }
        if let Some(f) = parent.and_then(|p| self.get_mut(p)?.as_folder_mut())
            && f.hot_child == Some(id)
        {
            f.hot_child = next.or(prev);
        }

        self.release_subtree(id);
    }

    fn subtree_len(&self, id: ItemId) -> usize {
        1 + self
            .children(id)
            .map(|child| self.subtree_len(child))
            .sum::<usize>()
    }

    fn release_subtree(&mut self, id: ItemId) {
        let mut child = self.first_child(id);
        while let Some(c) = child {
            child = self.sibling(c, Direction::Forward);
            self.release_subtree(c);
        }
        self.arena.release(id);
    }

    /// Writes the `/`-separated path of `id` (without the root) into `out`.
    ///
    /// Returns `false` if the id is stale, the item is nested deeper than the ancestor
    /// buffer allows, or the path did not fit in `out`.
    pub fn write_path<const N: usize>(&self, id: ItemId, out: &mut InlineStr<N>) -> bool {
        out.clear();
        if !self.is_alive(id) || id == self.root {
            return false;
        }
        let mut chain: SmallVec<[ItemId; 16]> = SmallVec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            if c == self.root {
                break;
            }
            if chain.len() == chain.inline_size() {
                return false;
            }
            chain.push(c);
            current = self.parent(c);
        }
        for (i, &c) in chain.iter().rev().enumerate() {
            let Some(item) = self.get(c) else {
                return false;
            };
            if i > 0 && out.write_char(PATH_SEPARATOR).is_err() {
                return false;
            }
            if out.write_str(item.title()).is_err() {
                return false;
            }
        }
        true
    }

    /// Iterates every item below the root in depth-first order.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants {
            tree: self,
            next: self.first_child(self.root),
        }
    }
}

/// Iterator over the children of one folder.
#[derive(Debug)]
pub struct Children<'t, 'a> {
    tree: &'t Tree<'a>,
    next: Option<ItemId>,
}

impl Iterator for Children<'_, '_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        let current = self.next?;
        self.next = self.tree.sibling(current, Direction::Forward);
        Some(current)
    }
}

/// Depth-first iterator over every item below the root.
#[derive(Debug)]
pub struct Descendants<'t, 'a> {
    tree: &'t Tree<'a>,
    next: Option<ItemId>,
}

impl Iterator for Descendants<'_, '_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        let current = self.next?;
        let tree = self.tree;
        self.next = tree.first_child(current).or_else(|| {
            let mut node = current;
            loop {
                if let Some(next) = tree.sibling(node, Direction::Forward) {
                    return Some(next);
                }
                match tree.parent(node) {
                    Some(parent) if parent != tree.root => node = parent,
                    _ => return None,
                }
            }
        });
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MAX_TITLE_LENGTH;
    use alloc::vec::Vec;

    fn titles<'t>(tree: &'t Tree<'_>, folder: ItemId) -> Vec<&'t str> {
        tree.children(folder)
            .map(|c| tree.get(c).unwrap().title())
            .collect()
    }

    #[test]
    fn create_builds_folders_and_a_leaf() {
        let mut tree = Tree::with_capacity(8);
        let leaf = tree.get_or_create(None, "Test/Sub/Flag", true).unwrap();
        let test = tree.find("Test").unwrap();
        let sub = tree.find("Test/Sub").unwrap();
        assert!(tree.get(test).unwrap().is_folder());
        assert!(tree.get(sub).unwrap().is_folder());
        assert!(!tree.get(leaf).unwrap().is_folder());
        assert_eq!(tree.parent(leaf), Some(sub));
        assert_eq!(tree.depth(leaf), 2);
        assert_eq!(tree.depth(test), 0);
        assert_eq!(tree.arena().len(), 4);
    }

    #[test]
    fn lookup_without_create_does_not_allocate() {
        let mut tree = Tree::with_capacity(4);
        assert_eq!(tree.get_or_create(None, "Missing/Path", false), None);
        assert_eq!(tree.arena().len(), 1);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = Tree::with_capacity(8);
        for name in ["A", "B", "C"] {
            tree.get_or_create(None, name, true);
        }
        assert_eq!(titles(&tree, tree.root()), ["A", "B", "C"]);
        let c = tree.find("C").unwrap();
        assert_eq!(tree.last_child(tree.root()), Some(c));
    }

    #[test]
    fn relative_lookup_starts_at_parent() {
        let mut tree = Tree::with_capacity(8);
        let folder = tree.get_or_create(None, "Audio", true).unwrap();
        assert!(tree.ensure_folder(folder));
        let volume = tree.get_or_create(Some(folder), "Volume", true).unwrap();
        assert_eq!(tree.find("Audio/Volume"), Some(volume));
    }

    #[test]
    fn leaf_with_values_blocks_descent() {
        static TITLES: [&str; 2] = ["Off", "On"];
        let mut tree = Tree::with_capacity(8);
        let leaf = tree.get_or_create(None, "Vsync", true).unwrap();
        *tree.leaf_mut(leaf).unwrap() = LeafData::new(&TITLES, &[], 0);
        assert_eq!(tree.get_or_create(None, "Vsync/Child", true), None);
    }

    #[test]
    fn truncated_titles_resolve_by_full_segment() {
        let mut tree = Tree::with_capacity(8);
        let long = "An extremely long folder title that will not fit";
        assert!(long.len() > MAX_TITLE_LENGTH);
        let path = alloc::format!("{long}/Leaf");
        let leaf = tree.get_or_create(None, &path, true).unwrap();
        let folder = tree.parent(leaf).unwrap();
        assert!(tree.get(folder).unwrap().title().ends_with(".."));
        assert_eq!(tree.find(&path), Some(leaf));
        assert_eq!(tree.get_or_create(None, &path, true), Some(leaf));
    }

    #[test]
    fn remove_relinks_siblings_and_hot_child() {
        let mut tree = Tree::with_capacity(8);
        let a = tree.get_or_create(None, "F/A", true).unwrap();
        let b = tree.get_or_create(None, "F/B", true).unwrap();
        let c = tree.get_or_create(None, "F/C", true).unwrap();
        let f = tree.find("F").unwrap();
        tree.set_hot_child(f, Some(b));

        tree.remove(b);
        assert_eq!(titles(&tree, f), ["A", "C"]);
        assert_eq!(tree.sibling(a, Direction::Forward), Some(c));
        assert_eq!(tree.sibling(c, Direction::Backward), Some(a));
        assert_eq!(tree.folder(f).unwrap().hot_child(), Some(c));

        tree.remove(a);
        assert_eq!(tree.first_child(f), Some(c));
        assert_eq!(tree.sibling(c, Direction::Backward), None);
    }

    #[test]
    fn remove_frees_the_whole_subtree() {
        let mut tree = Tree::with_capacity(8);
        tree.get_or_create(None, "F/G/A", true).unwrap();
        tree.get_or_create(None, "F/G/B", true).unwrap();
        let f = tree.find("F").unwrap();
        assert_eq!(tree.arena().len(), 5);
        tree.remove(f);
        assert_eq!(tree.arena().len(), 1);
        assert_eq!(tree.arena().free_count(), 4);
        assert_eq!(tree.find("F/G/A"), None);
        assert_eq!(tree.first_child(tree.root()), None);
    }

    #[test]
    fn removed_slot_is_reused_first() {
        let mut tree = Tree::with_capacity(8);
        let a = tree.get_or_create(None, "A", true).unwrap();
        tree.get_or_create(None, "B", true).unwrap();
        let high_water = tree.arena().high_water();
        tree.remove(a);
        let c = tree.get_or_create(None, "C", true).unwrap();
        assert_eq!(c.index(), a.index());
        assert_eq!(tree.arena().high_water(), high_water);
        assert!(!tree.is_alive(a));
    }

    #[test]
    fn write_path_joins_titles() {
        let mut tree = Tree::with_capacity(8);
        let leaf = tree.get_or_create(None, "Test/Bool", true).unwrap();
        let mut path = InlineStr::<64>::new();
        assert!(tree.write_path(leaf, &mut path));
        assert_eq!(path.as_str(), "Test/Bool");

        let mut tiny = InlineStr::<4>::new();
        assert!(!tree.write_path(leaf, &mut tiny));
    }

    #[test]
    fn descendants_are_depth_first() {
        let mut tree = Tree::with_capacity(8);
        for path in ["A/X", "A/Y", "B", "C/Z"] {
            tree.get_or_create(None, path, true);
        }
        let order: Vec<&str> = tree
            .descendants()
            .map(|id| tree.get(id).unwrap().title())
            .collect();
        assert_eq!(order, ["A", "X", "Y", "B", "C", "Z"]);
    }
}
