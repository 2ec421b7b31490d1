// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu instance: cursor, filter, scrolling, animation, and drawing.

use core::fmt;
use core::ops::ControlFlow;

use kurbo::{Point, Size};
use smallvec::SmallVec;
use tweakmenu_tree::{
    ChangeCallback, Direction, Filter, Item, ItemChange, ItemFlags, ItemId, ItemKind, LeafData,
    Preset, Slot, Tree,
};

use crate::animation::Openness;
use crate::config::MenuConfig;
use crate::draw::Drawer;
use crate::focus::FocusBand;
use crate::layout::{Layout, Row, RowKind};

/// Value titles of a bool item.
pub const BOOL_TITLES: [&str; 2] = ["False", "True"];
/// Values of a bool item, one byte each.
pub const BOOL_VALUES: [u8; 2] = [0, 1];
/// Value title of a preset item.
pub const PRESET_TITLES: [&str; 1] = ["Apply"];
/// Catch-up rate of the scroll position drawn by [`Menu::draw`], per second.
pub const SCROLL_SMOOTHING: f64 = 12.0;

/// Rows gathered per drawing pass; keeps the row buffer on the stack.
const ROW_BATCH: usize = 64;

static BOOL_TITLES_STATIC: [&str; 2] = BOOL_TITLES;
static BOOL_VALUES_STATIC: [u8; 2] = BOOL_VALUES;
static PRESET_TITLES_STATIC: [&str; 1] = PRESET_TITLES;

/// Everything needed to turn a path into a settable leaf.
///
/// ```rust
/// use tweakmenu::ArrayItem;
///
/// static QUALITY: [&str; 3] = ["Low", "Medium", "High"];
/// static LEVELS: [u8; 3] = [0, 1, 2];
///
/// let item = ArrayItem::new(&QUALITY, &LEVELS, 1)
///     .description("Shadow map resolution.")
///     .user_data(7);
/// assert_eq!(item.value_titles.len(), 3);
/// ```
#[derive(Clone, Copy, Default)]
pub struct ArrayItem<'a> {
    /// Help text shown while the leaf is expanded.
    pub description: &'a str,
    /// Display string per value.
    pub value_titles: &'a [&'a str],
    /// Caller-owned value storage, `value_titles.len()` elements of `element_size` bytes.
    pub values: &'a [u8],
    /// Size of one value in bytes.
    pub element_size: usize,
    /// Run on every commit.
    pub on_item_changed: Option<ChangeCallback<'a>>,
    /// Token handed back to the callback.
    pub user_data: u64,
}

impl<'a> ArrayItem<'a> {
    /// An item choosing among `value_titles`, backed by `values` in `element_size` chunks.
    pub fn new(value_titles: &'a [&'a str], values: &'a [u8], element_size: usize) -> Self {
        Self {
            value_titles,
            values,
            element_size,
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_changed(mut self, callback: ChangeCallback<'a>) -> Self {
        self.on_item_changed = Some(callback);
        self
    }

    /// Sets the user token.
    #[must_use]
    pub fn user_data(mut self, user_data: u64) -> Self {
        self.user_data = user_data;
        self
    }
}

impl fmt::Debug for ArrayItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayItem")
            .field("description", &self.description)
            .field("value_titles", &self.value_titles)
            .field("values", &self.values.len())
            .field("element_size", &self.element_size)
            .field("on_item_changed", &self.on_item_changed.is_some())
            .field("user_data", &self.user_data)
            .finish()
    }
}

/// A debug menu.
///
/// Owns its item tree and the host's [`Drawer`]. Every operation runs synchronously; the
/// host calls [`Menu::update`] and [`Menu::draw`] once per frame and the navigation
/// operations (directly or through an [`InputController`](crate::InputController)) in
/// between.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Size};
/// use tweakmenu::{Color, Drawer, Font, Menu, MenuConfig};
///
/// struct NullDrawer;
///
/// impl Drawer for NullDrawer {
///     fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}
///     fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}
///     fn measure_text(&self, text: &str, _: &Font) -> Size {
///         Size::new(8.0 * text.len() as f64, 16.0)
///     }
/// }
///
/// let mut menu = Menu::new(MenuConfig::default(), NullDrawer, 32);
/// let flag = menu.create_bool_item("Test/Flag", "A flag.", None, 0).unwrap();
///
/// // Expand the leaf, move to "True", and commit it.
/// menu.set_hot_item(flag);
/// menu.move_to_child();
/// menu.move_sibling_next();
/// menu.move_to_child();
/// assert_eq!(menu.tree().leaf(flag).unwrap().active_index, 1);
/// ```
pub struct Menu<'a, D> {
    tree: Tree<'a>,
    hot_item: ItemId,
    filter: Filter,
    focus: FocusBand,
    openness: Openness,
    drawn_top: Option<f64>,
    config: MenuConfig,
    drawer: D,
}

impl<D> fmt::Debug for Menu<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("tree", &self.tree)
            .field("hot_item", &self.hot_item)
            .field("filter", &self.filter)
            .field("focus", &self.focus)
            .field("openness", &self.openness)
            .field("drawn_top", &self.drawn_top)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a, D: Drawer> Menu<'a, D> {
    /// Creates a menu whose arena reserves `capacity` items (including the root) up front.
    pub fn new(config: MenuConfig, drawer: D, capacity: usize) -> Self {
        Self::with_tree(config, drawer, Tree::with_capacity(capacity))
    }

    /// Creates a menu storing its items in `slots`. No allocation takes place.
    pub fn with_slots(config: MenuConfig, drawer: D, slots: &'a mut [Slot<'a>]) -> Self {
        Self::with_tree(config, drawer, Tree::from_slots(slots))
    }

    fn with_tree(config: MenuConfig, drawer: D, tree: Tree<'a>) -> Self {
        let mut filter = Filter::default();
        filter.set_enabled(config.filter_enabled_at_start);
        Self {
            hot_item: tree.root(),
            tree,
            filter,
            focus: FocusBand::new(config.focus_height),
            openness: Openness::closed(),
            drawn_top: None,
            config,
            drawer,
        }
    }

    /// The item tree.
    pub fn tree(&self) -> &Tree<'a> {
        &self.tree
    }

    /// Mutable access to the item tree.
    ///
    /// Structural edits made here bypass cursor upkeep; prefer the menu's own operations.
    pub fn tree_mut(&mut self) -> &mut Tree<'a> {
        &mut self.tree
    }

    /// The configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The host's drawer.
    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    /// Mutable access to the host's drawer.
    pub fn drawer_mut(&mut self) -> &mut D {
        &mut self.drawer
    }

    /// Consumes the menu and returns the drawer.
    pub fn into_drawer(self) -> D {
        self.drawer
    }

    // --- Items ---

    /// Looks up an item by path.
    pub fn get_item(&self, path: &str) -> Option<ItemId> {
        self.tree.find(path)
    }

    /// Creates (or finds) a folder at `path`.
    ///
    /// Returns `None` when the path runs through a leaf with values or names one.
    ///
    /// # Panics
    ///
    /// Panics when the arena runs out of slots.
    pub fn create_folder(&mut self, path: &str) -> Option<ItemId> {
        let id = self.tree.get_or_create(None, path, true)?;
        if !self.tree.ensure_folder(id) {
            return None;
        }
        self.after_insert();
        Some(id)
    }

    /// Creates (or redefines) a leaf at `path` below `parent` (the root when `None`).
    ///
    /// Redefining keeps the leaf's cursor, committed, and default positions where they still
    /// fit. A value remembered by [`Menu::load_item`] for this path is applied and committed.
    /// Returns `None` when `path` names a folder with children or runs through a leaf with
    /// values.
    ///
    /// # Panics
    ///
    /// Panics when the arena runs out of slots.
    pub fn create_array_item(
        &mut self,
        parent: Option<ItemId>,
        path: &str,
        item: ArrayItem<'a>,
    ) -> Option<ItemId> {
        let id = self.tree.get_or_create(parent, path, true)?;
        if !self.tree.ensure_leaf(id) {
            return None;
        }
        let entry = self.tree.get_mut(id)?;
        entry.user_data = item.user_data;
        let leaf = entry.as_leaf_mut()?;
        leaf.description = item.description;
        leaf.value_titles = item.value_titles;
        leaf.values = item.values;
        leaf.element_size = item.element_size;
        leaf.on_item_changed = item.on_item_changed;
        leaf.clamp_indices();

        if let Some(pending) = leaf.pending_value.take()
            && let Some(index) = leaf.index_of_title(pending)
        {
            leaf.hot_index = index;
            self.commit(id, true);
        }

        self.after_insert();
        Some(id)
    }

    /// Creates a two-valued `False`/`True` leaf backed by [`BOOL_VALUES`].
    ///
    /// # Panics
    ///
    /// Panics when the arena runs out of slots.
    pub fn create_bool_item(
        &mut self,
        path: &str,
        description: &'a str,
        on_changed: Option<ChangeCallback<'a>>,
        user_data: u64,
    ) -> Option<ItemId> {
        let mut item = ArrayItem::new(&BOOL_TITLES_STATIC, &BOOL_VALUES_STATIC, 1)
            .description(description)
            .user_data(user_data);
        item.on_item_changed = on_changed;
        self.create_array_item(None, path, item)
    }

    /// Creates a single-valued leaf that, when committed, loads each `(path, value title)` pair.
    ///
    /// # Panics
    ///
    /// Panics when the arena runs out of slots.
    pub fn create_preset_item(
        &mut self,
        path: &str,
        description: &'a str,
        paths: &'a [&'a str],
        value_titles: &'a [&'a str],
    ) -> Option<ItemId> {
        let id = self.create_array_item(
            None,
            path,
            ArrayItem::new(&PRESET_TITLES_STATIC, &[], 0).description(description),
        )?;
        if let Some(leaf) = self.tree.leaf_mut(id) {
            leaf.preset = Some(Preset {
                paths,
                value_titles,
            });
        }
        Some(id)
    }

    /// Removes the item at `path` with its subtree. A missing path does nothing.
    ///
    /// When the cursor was inside the removed subtree it moves to the next shown sibling,
    /// else the previous one, else the parent.
    pub fn remove_item(&mut self, path: &str) {
        let Some(id) = self.tree.find(path) else {
            return;
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("remove_item", path).entered();

        let relocate = self.tree.is_within(self.hot_item, id).then(|| {
            let shown = Item::is_shown;
            self.tree
                .sibling_where(id, Direction::Forward, shown)
                .or_else(|| self.tree.sibling_where(id, Direction::Backward, shown))
                .or_else(|| self.tree.parent(id))
                .unwrap_or(self.tree.root())
        });
        self.tree.remove(id);
        if let Some(target) = relocate {
            self.hot_item = target;
            self.record_hot_child(target);
        }
        self.tree.apply_filter(&self.filter);
        self.clamp_focus();
    }

    /// Re-marks visibility and keeps the cursor on something selectable after items appear.
    pub(crate) fn after_insert(&mut self) {
        self.tree.apply_filter(&self.filter);
        let lost = self.hot_item == self.tree.root() || !self.tree.is_shown(self.hot_item);
        if lost && let Some(first) = self.tree.first_leaf(Item::is_shown) {
            self.set_hot(first);
        } else {
            self.clamp_focus();
        }
    }

    // --- Cursor ---

    /// The item under the cursor. The root when nothing is selectable.
    pub fn hot_item(&self) -> ItemId {
        self.hot_item
    }

    /// Moves the cursor to `id`. Returns `false` (and does nothing) for the root or stale ids.
    pub fn set_hot_item(&mut self, id: ItemId) -> bool {
        if id == self.tree.root() || !self.tree.is_alive(id) {
            return false;
        }
        self.set_hot(id);
        true
    }

    fn set_hot(&mut self, id: ItemId) {
        if id != self.hot_item
            && let Some(leaf) = self.tree.leaf_mut(self.hot_item)
        {
            leaf.is_active = false;
        }
        self.hot_item = id;
        self.record_hot_child(id);

        #[cfg(feature = "tracing")]
        tracing::trace!(item = id.index(), "hot item");

        self.clamp_focus();
    }

    fn record_hot_child(&mut self, id: ItemId) {
        if let Some(parent) = self.tree.parent(id) {
            self.tree.set_hot_child(parent, Some(id));
        }
    }

    fn hot_leaf(&self) -> Option<&LeafData<'a>> {
        self.tree.leaf(self.hot_item)
    }

    fn active_leaf(&self) -> bool {
        self.hot_leaf().is_some_and(|leaf| leaf.is_active)
    }

    fn cycle_hot_value(&mut self, direction: Direction) {
        let Some(leaf) = self.tree.leaf_mut(self.hot_item) else {
            return;
        };
        let count = leaf.num_values();
        if count == 0 {
            return;
        }
        leaf.hot_index = match direction {
            Direction::Forward => (leaf.hot_index + 1) % count,
            Direction::Backward => (leaf.hot_index + count - 1) % count,
        };
        self.clamp_focus();
    }

    /// Enters the hot item.
    ///
    /// On a folder the cursor descends to the remembered child, or the first shown one. On a
    /// collapsed leaf the value list expands; on an expanded leaf the highlighted value is
    /// committed. Leaves without values ignore this.
    pub fn move_to_child(&mut self) {
        match self.tree.get(self.hot_item).map(Item::kind) {
            Some(ItemKind::Folder(folder)) => {
                let remembered = folder
                    .hot_child()
                    .filter(|&child| self.tree.is_shown(child));
                let target = remembered.or_else(|| {
                    self.tree
                        .edge_child_where(self.hot_item, Direction::Forward, Item::is_shown)
                });
                if let Some(target) = target {
                    self.set_hot(target);
                }
            }
            Some(ItemKind::Leaf(leaf)) if leaf.num_values() > 0 => {
                if leaf.is_active {
                    self.commit(self.hot_item, true);
                } else if let Some(leaf) = self.tree.leaf_mut(self.hot_item) {
                    leaf.is_active = true;
                    leaf.hot_index = leaf.active_index;
                    self.clamp_focus();
                }
            }
            _ => {}
        }
    }

    /// Commits the hot leaf's highlighted value without expanding it first.
    pub fn activate_direct(&mut self) {
        if self.hot_leaf().is_some_and(|leaf| leaf.num_values() > 0) {
            self.commit(self.hot_item, true);
        }
    }

    /// Collapses an expanded hot leaf, or moves the cursor up one level (never onto the root).
    pub fn move_to_parent(&mut self) {
        if self.active_leaf() {
            if let Some(leaf) = self.tree.leaf_mut(self.hot_item) {
                leaf.is_active = false;
            }
            self.clamp_focus();
            return;
        }
        if let Some(parent) = self.tree.parent(self.hot_item)
            && parent != self.tree.root()
        {
            let child = self.hot_item;
            self.set_hot(parent);
            self.tree.set_hot_child(parent, Some(child));
        }
    }

    /// Next shown sibling, wrapping; cycles values forward on an expanded leaf.
    pub fn move_sibling_next(&mut self) {
        self.move_sibling(Direction::Forward);
    }

    /// Previous shown sibling, wrapping; cycles values backward on an expanded leaf.
    pub fn move_sibling_previous(&mut self) {
        self.move_sibling(Direction::Backward);
    }

    fn move_sibling(&mut self, direction: Direction) {
        if self.active_leaf() {
            self.cycle_hot_value(direction);
            return;
        }
        if let Some(target) =
            self.tree
                .wrapping_sibling_where(self.hot_item, direction, Item::is_shown)
        {
            self.set_hot(target);
        }
    }

    /// Next shown leaf in depth-first order, wrapping; cycles values on an expanded leaf.
    ///
    /// A long move steps to the next shown sibling at the current depth instead.
    pub fn move_to_next_leaf(&mut self, long_move: bool) {
        self.move_to_leaf(Direction::Forward, long_move);
    }

    /// Previous shown leaf in depth-first order, wrapping; cycles values on an expanded leaf.
    ///
    /// A long move steps to the previous shown sibling at the current depth instead.
    pub fn move_to_prev_leaf(&mut self, long_move: bool) {
        self.move_to_leaf(Direction::Backward, long_move);
    }

    fn move_to_leaf(&mut self, direction: Direction, long_move: bool) {
        if self.active_leaf() {
            self.cycle_hot_value(direction);
            return;
        }
        if long_move {
            self.move_sibling(direction);
            return;
        }
        if let Some(target) = self
            .tree
            .step_leaf(self.hot_item, direction, Item::is_shown)
        {
            self.set_hot(target);
        }
    }

    /// Moves the cursor to the top level: the root's remembered child, or its first shown one.
    pub fn move_to_root(&mut self) {
        let root = self.tree.root();
        let remembered = self
            .tree
            .folder(root)
            .and_then(|f| f.hot_child())
            .filter(|&child| self.tree.is_shown(child));
        let target = remembered
            .or_else(|| self.tree.edge_child_where(root, Direction::Forward, Item::is_shown));
        if let Some(target) = target {
            self.set_hot(target);
        }
    }

    /// Moves the cursor to the last shown top-level item.
    pub fn move_to_last(&mut self) {
        let root = self.tree.root();
        if let Some(target) = self
            .tree
            .edge_child_where(root, Direction::Backward, Item::is_shown)
        {
            self.set_hot(target);
        }
    }

    /// Commits the hot value of leaf `id`, fires its callback, and applies its preset.
    ///
    /// Presets chain only one level deep so a preset naming itself cannot recurse.
    pub(crate) fn commit(&mut self, id: ItemId, apply_preset: bool) {
        let Some(item) = self.tree.get(id) else {
            return;
        };
        let Some(&leaf) = item.as_leaf() else {
            return;
        };
        if leaf.num_values() == 0 {
            return;
        }
        let title = *item.full_title();
        let user_data = item.user_data;
        let index = leaf.hot_index.min(leaf.num_values() - 1);
        if let Some(leaf) = self.tree.leaf_mut(id) {
            leaf.active_index = index;
            leaf.hot_index = index;
        }

        let value_title = leaf.value_title(index).unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::trace!(item = title.as_str(), value = value_title, "commit");

        if let Some(callback) = leaf.on_item_changed {
            callback(&ItemChange {
                item: id,
                title: title.as_str(),
                value_index: index,
                value: leaf.value(index),
                value_title,
                user_data,
            });
        }

        if apply_preset && let Some(preset) = leaf.preset {
            for (path, value_title) in preset.entries() {
                self.apply_saved_value(path, value_title, false);
            }
        }
    }

    // --- Filter ---

    /// The filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns `true` if the filter bar is shown.
    pub fn is_filtering_enabled(&self) -> bool {
        self.filter.is_enabled()
    }

    /// Shows or hides the filter bar. Hiding it clears the text.
    pub fn set_filtering_enabled(&mut self, enabled: bool) {
        self.filter.set_enabled(enabled);
        self.refilter();
    }

    /// Replaces the filter text and re-marks visibility.
    pub fn update_filter(&mut self, text: &str) {
        self.filter.set_text(text);
        self.refilter();
    }

    /// Removes the last filter character, or disables filtering when the text is empty.
    pub fn filter_backspace(&mut self) {
        self.filter.backspace();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.tree.apply_filter(&self.filter);
        let root = self.tree.root();
        if self.hot_item == root || !self.tree.is_shown(self.hot_item) {
            let target = self
                .tree
                .step_leaf(self.hot_item, Direction::Forward, Item::is_shown)
                .or_else(|| {
                    self.tree
                        .step_leaf(self.hot_item, Direction::Backward, Item::is_shown)
                });
            if let Some(target) = target {
                #[cfg(feature = "tracing")]
                tracing::trace!(item = target.index(), "cursor relocated by filter");
                self.set_hot(target);
            }
        }
        self.clamp_focus();
    }

    // --- Scrolling ---

    fn layout(&self) -> Layout<'_, 'a, D> {
        Layout {
            tree: &self.tree,
            config: &self.config,
            drawer: &self.drawer,
        }
    }

    /// Height of the laid-out tree in pixels.
    pub fn total_height(&self) -> f64 {
        self.layout().total_height()
    }

    /// Distance from the top of the tree to the hot row, in pixels.
    pub fn hot_offset(&self) -> f64 {
        self.layout().offset_of(self.hot_item).unwrap_or(0.0)
    }

    /// The current focus height.
    pub fn focus_height(&self) -> f64 {
        self.focus.height()
    }

    /// Sets the focus height and re-clamps.
    pub fn set_focus_height(&mut self, height: f64) {
        self.focus.set_height(height);
        self.clamp_focus();
    }

    /// Returns the focus height to its resting value.
    pub fn reset_focus(&mut self) {
        self.focus.reset();
        self.clamp_focus();
    }

    /// Adds `delta` to the focus height and re-clamps.
    pub fn scroll(&mut self, delta: f64) {
        let (total, hot) = (self.total_height(), self.hot_offset());
        self.focus
            .scroll_by(delta, total, hot, self.config.size.height);
    }

    /// Top of the tree relative to the top of the panel, in pixels.
    pub fn tree_top(&self) -> f64 {
        self.focus
            .tree_top(self.hot_offset(), self.config.size.height)
    }

    fn clamp_focus(&mut self) {
        let (total, hot) = (self.total_height(), self.hot_offset());
        self.focus.clamp(total, hot, self.config.size.height);
    }

    fn row_at_height(&self, y: f64) -> Option<Row<'a>> {
        self.layout().row_at(y - self.tree_top())
    }

    /// The item drawn at `y` pixels below the top of the panel, or the nearest one.
    pub fn hot_item_at_height(&self, y: f64) -> Option<ItemId> {
        self.row_at_height(y).map(|row| row.item)
    }

    /// Acts on the row at `y` pixels below the top of the panel, as a click would.
    ///
    /// A value row commits that value. A title row moves the cursor there and enters it.
    pub fn activate_at_height(&mut self, y: f64) {
        let Some(row) = self.row_at_height(y) else {
            return;
        };
        match row.kind {
            RowKind::Value(index) => {
                if let Some(leaf) = self.tree.leaf_mut(row.item) {
                    leaf.hot_index = index;
                }
                self.commit(row.item, true);
            }
            RowKind::Description(_) => {}
            RowKind::Title => {
                if row.item != self.hot_item {
                    self.set_hot(row.item);
                }
                self.move_to_child();
            }
        }
    }

    // --- Geometry ---

    /// Sets the row height.
    pub fn set_item_height(&mut self, height: f64) {
        self.config.item_height = height;
        self.clamp_focus();
    }

    /// Sets the panel size.
    pub fn set_size(&mut self, size: Size) {
        self.config.size = size;
        self.clamp_focus();
    }

    /// Sets the host screen size.
    pub fn set_screen_size(&mut self, size: Size) {
        self.config.screen_size = size;
    }

    /// Moves the panel.
    pub fn set_top_left(&mut self, top_left: Point) {
        self.config.top_left = top_left;
    }

    // --- Open / close ---

    /// Returns `true` if the menu is open or opening.
    pub fn is_open(&self) -> bool {
        self.openness.is_open()
    }

    /// Starts opening or closing.
    pub fn set_open(&mut self, open: bool) {
        self.openness.set_open(open);
    }

    /// Eased openness in `[0, 1]`.
    pub fn openness(&self) -> f64 {
        self.openness.value()
    }

    /// Advances the open/close animation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.openness.update(dt, self.config.open_speed);
    }

    // --- Drawing ---

    /// Draws the menu through the drawer. Draws nothing while fully closed.
    ///
    /// The drawn scroll position follows [`Menu::tree_top`] smoothly, closing the gap at
    /// [`SCROLL_SMOOTHING`] per second of `dt`.
    pub fn draw(&mut self, dt: f64) {
        let openness = self.openness.value();
        if openness <= 0.0 {
            self.drawn_top = None;
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("menu_draw", openness).entered();

        let config = self.config;
        let theme = &config.theme;
        let origin = Point::new(
            config.top_left.x - (1.0 - openness) * config.size.width,
            config.top_left.y,
        );
        let target = self.tree_top();
        let drawn = match self.drawn_top {
            Some(top) => top + (target - top) * (dt * SCROLL_SMOOTHING).clamp(0.0, 1.0),
            None => target,
        };
        self.drawn_top = Some(drawn);
        let tree_top = origin.y + drawn;
        let bottom = origin.y + config.size.height;
        let hot_item = self.hot_item;

        self.drawer.draw_rect(origin, config.size, theme.background);

        // Rows are drawn in fixed batches: the layout borrows the drawer while walking, so
        // each pass skips what is already drawn and collects at most `ROW_BATCH` more.
        let mut done = 0;
        loop {
            let mut batch: SmallVec<[(Row<'a>, f64); ROW_BATCH]> = SmallVec::new();
            let mut seen = 0;
            let layout = Layout {
                tree: &self.tree,
                config: &config,
                drawer: &self.drawer,
            };
            let flow = layout.walk(|row| {
                let y = tree_top + row.y;
                if y > bottom {
                    return ControlFlow::Break(false);
                }
                if y + row.height < origin.y {
                    return ControlFlow::Continue(());
                }
                seen += 1;
                if seen <= done {
                    return ControlFlow::Continue(());
                }
                if batch.len() == ROW_BATCH {
                    return ControlFlow::Break(true);
                }
                batch.push((*row, origin.x + layout.text_x(row)));
                ControlFlow::Continue(())
            });
            done += batch.len();

            for (row, x) in &batch {
                let Some(item) = self.tree.get(row.item) else {
                    continue;
                };
                let at = Point::new(*x, tree_top + row.y);
                draw_row(&mut self.drawer, &config, item, row, hot_item, at, origin.x);
            }
            if flow != ControlFlow::Break(true) {
                break;
            }
        }

        if self.filter.is_enabled() {
            let bar = Size::new(config.size.width, config.item_height);
            self.drawer.draw_rect(origin, bar, theme.background);
            let text_at = Point::new(origin.x + config.padding, origin.y);
            self.drawer
                .draw_text("Filter:", text_at, theme.filter, &config.fonts.filter);
            let label = self.drawer.measure_text("Filter: ", &config.fonts.filter);
            self.drawer.draw_text(
                self.filter.text(),
                Point::new(text_at.x + label.width, text_at.y),
                theme.filter,
                &config.fonts.filter,
            );
        }
    }
}

fn draw_row<D: Drawer + ?Sized>(
    drawer: &mut D,
    config: &MenuConfig,
    item: &Item<'_>,
    row: &Row<'_>,
    hot_item: ItemId,
    at: Point,
    panel_x: f64,
) {
    let theme = &config.theme;
    let fonts = &config.fonts;
    let highlight = Size::new(config.size.width, row.height);
    let value_x = panel_x + config.size.width * config.value_column;

    match (row.kind, item.kind()) {
        (RowKind::Title, ItemKind::Folder(_)) => {
            if row.item == hot_item {
                drawer.draw_rect(Point::new(panel_x, at.y), highlight, theme.hot_background);
            }
            drawer.draw_text(item.title(), at, theme.folder_title, &fonts.folder);
        }
        (RowKind::Title, ItemKind::Leaf(leaf)) => {
            if row.item == hot_item && !leaf.is_active {
                drawer.draw_rect(Point::new(panel_x, at.y), highlight, theme.hot_background);
            }
            let color = if item.flags().contains(ItemFlags::MATCHES_FILTER) {
                theme.item_title_match
            } else {
                theme.item_title
            };
            drawer.draw_text(item.title(), at, color, &fonts.item);
            if let Some(value) = leaf.value_title(leaf.active_index) {
                let color = if leaf.is_overridden() {
                    theme.value_overridden
                } else {
                    theme.value_default
                };
                drawer.draw_text(value, Point::new(value_x, at.y), color, &fonts.value);
            }
        }
        (RowKind::Description(line), _) => {
            drawer.draw_text(line, at, theme.description, &fonts.description);
        }
        (RowKind::Value(index), ItemKind::Leaf(leaf)) => {
            if index == leaf.hot_index {
                drawer.draw_rect(Point::new(panel_x, at.y), highlight, theme.hot_background);
            }
            let color = if index != leaf.active_index {
                theme.value
            } else if leaf.is_overridden() {
                theme.value_overridden
            } else {
                theme.value_default
            };
            let title = leaf.value_title(index).unwrap_or_default();
            drawer.draw_text(title, at, color, &fonts.value);
        }
        (RowKind::Value(_), ItemKind::Folder(_)) => {}
    }
}
