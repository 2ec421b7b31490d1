// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tweakmenu --heading-base-level=0

//! Tweakmenu: an allocation-free, hierarchical debug menu for real-time applications.
//!
//! A [`Menu`] is a tree of folders and settable leaves addressed by `/`-separated paths. The
//! host creates items, feeds input, and lets the menu draw itself through a [`Drawer`] once a
//! frame. Committing a value runs the leaf's change callback; that is how a game or tool learns
//! about a changed setting.
//!
//! - Navigation: depth-first leaf stepping that wraps, sibling moves, entering and leaving
//!   folders, expanding a leaf to pick among its values.
//! - Filtering: case-sensitive substring filtering that keeps matching leaves and their
//!   ancestors, moving the cursor off anything hidden.
//! - Scrolling: a clamped focus band that keeps the hot row in view.
//! - Animation: an eased open/close slide.
//! - Persistence: [`Menu::save`] reports overridden values; [`Menu::load_item`] applies them,
//!   also before the item exists.
//! - Presets: one leaf that loads a group of values when committed.
//! - Input: [`InputController`] maps an [`InputDevice`] to the operations above, with key
//!   and stick repeat.
//! - [`MenuRegistry`]: a handful of named menus side by side.
//!
//! The tree itself lives in [`tweakmenu_tree`], re-exported here.
//!
//! ## Example
//!
//! ```rust
//! use core::cell::Cell;
//! use kurbo::{Point, Size};
//! use tweakmenu::{ArrayItem, Color, Drawer, Font, ItemChange, Menu, MenuConfig};
//!
//! /// Counts draw calls instead of drawing.
//! #[derive(Default)]
//! struct CountingDrawer {
//!     calls: usize,
//! }
//!
//! impl Drawer for CountingDrawer {
//!     fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {
//!         self.calls += 1;
//!     }
//!     fn draw_rect(&mut self, _: Point, _: Size, _: Color) {
//!         self.calls += 1;
//!     }
//!     fn measure_text(&self, text: &str, _: &Font) -> Size {
//!         Size::new(8.0 * text.len() as f64, 16.0)
//!     }
//! }
//!
//! static QUALITY: [&str; 3] = ["Low", "Medium", "High"];
//! static LEVELS: [u8; 3] = [0, 1, 2];
//!
//! let shadows = Cell::new(0_u8);
//! let on_changed = |change: &ItemChange<'_>| shadows.set(change.value[0]);
//!
//! let mut menu = Menu::new(MenuConfig::default(), CountingDrawer::default(), 32);
//! let item = ArrayItem::new(&QUALITY, &LEVELS, 1).on_changed(&on_changed);
//! menu.create_array_item(None, "Rendering/Shadows", item);
//!
//! menu.load_item("Rendering/Shadows", "High");
//! assert_eq!(shadows.get(), 2);
//!
//! menu.set_open(true);
//! menu.update(1.0);
//! menu.draw(1.0 / 60.0);
//! assert!(menu.drawer().calls > 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math through `kurbo/libm`.
//! - `compact_titles`: 20-byte item titles instead of 32.
//! - `tracing`: spans and events through the `tracing` crate.
//!
//! This crate is `no_std`. A [`Menu`] built with [`Menu::with_slots`] keeps its items in the
//! caller's slots and allocates nothing for them.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod draw;
mod focus;
mod input;
mod layout;
mod menu;
mod persist;
mod registry;

pub use animation::{Openness, ease_out};
pub use config::{Color, Font, Fonts, MenuConfig, Theme};
pub use draw::{Drawer, WrappedLines};
pub use focus::FocusBand;
pub use input::{
    Axis, Buttons, InputController, InputDevice, KEY_REPEAT_DELAY, KEY_REPEAT_INTERVAL,
    STICK_DEAD_ZONE, STICK_REPEAT_DELAY, STICK_REPEAT_INTERVAL, WHEEL_SCROLL,
};
pub use menu::{
    ArrayItem, BOOL_TITLES, BOOL_VALUES, Menu, PRESET_TITLES, SCROLL_SMOOTHING,
};
pub use persist::MAX_PATH_LENGTH;
pub use registry::{
    DEFAULT_MENU_ID, MAX_MENU_ID_LENGTH, MAX_MENUS, MenuId, MenuRegistry, RegistryError,
};

pub use tweakmenu_tree;
pub use tweakmenu_tree::{
    ChangeCallback, Direction, Filter, Item, ItemChange, ItemFlags, ItemId, ItemKind, LeafData,
    Slot,
};
