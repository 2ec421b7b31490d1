// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving and loading chosen values as `path -> value title` pairs.

use tweakmenu_tree::{InlineStr, Item, ItemKind};

use crate::draw::Drawer;
use crate::menu::Menu;

/// Longest item path [`Menu::save`] reports, in bytes.
pub const MAX_PATH_LENGTH: usize = 256;

impl<'a, D: Drawer> Menu<'a, D> {
    /// Reports each leaf whose committed value differs from its default as `(path, value title)`.
    ///
    /// Values loaded for leaves that have not been created yet are reported too, so loading
    /// and saving again keeps them. Paths longer than [`MAX_PATH_LENGTH`] are skipped.
    /// Returns the number of pairs reported.
    pub fn save(&self, mut sink: impl FnMut(&str, &str)) -> usize {
        let tree = self.tree();
        let mut path = InlineStr::<MAX_PATH_LENGTH>::new();
        let mut saved = 0;
        for id in tree.descendants() {
            let Some(leaf) = tree.get(id).and_then(Item::as_leaf) else {
                continue;
            };
            let value_title = if leaf.is_overridden() {
                leaf.value_title(leaf.active_index)
            } else if leaf.num_values() == 0 {
                leaf.pending_value
            } else {
                None
            };
            let Some(value_title) = value_title else {
                continue;
            };
            if !tree.write_path(id, &mut path) {
                #[cfg(feature = "tracing")]
                tracing::warn!(item = id.index(), "path too long to save");
                continue;
            }
            sink(path.as_str(), value_title);
            saved += 1;
        }
        saved
    }

    /// Applies a saved value.
    ///
    /// If the leaf at `path` exists and has a value titled `value_title`, that value becomes
    /// hot and committed, firing the change callback. If the leaf has no values yet (or does
    /// not exist, in which case a hidden placeholder is created), the title is remembered and
    /// applied when [`Menu::create_array_item`] gives the leaf its values. Folders and unknown
    /// titles are ignored.
    ///
    /// # Panics
    ///
    /// Panics when the arena runs out of slots for the placeholder.
    pub fn load_item(&mut self, path: &str, value_title: &'a str) {
        self.apply_saved_value(path, value_title, true);
    }

    pub(crate) fn apply_saved_value(&mut self, path: &str, value_title: &'a str, apply_preset: bool) {
        let Some(id) = self.tree_mut().get_or_create(None, path, true) else {
            return;
        };
        let Some(ItemKind::Leaf(leaf)) = self.tree().get(id).map(Item::kind) else {
            return;
        };
        if leaf.num_values() == 0 {
            if let Some(leaf) = self.tree_mut().leaf_mut(id) {
                leaf.pending_value = Some(value_title);
            }
            self.after_insert();
            return;
        }
        let Some(index) = leaf.index_of_title(value_title) else {
            return;
        };
        if let Some(leaf) = self.tree_mut().leaf_mut(id) {
            leaf.hot_index = index;
        }
        self.commit(id, apply_preset);
    }

    /// Makes the value titled `value_title` the default of the leaf at `path`.
    ///
    /// Returns `false` if there is no such leaf or value.
    pub fn set_default_value(&mut self, path: &str, value_title: &str) -> bool {
        let Some(id) = self.get_item(path) else {
            return false;
        };
        let Some(leaf) = self.tree_mut().leaf_mut(id) else {
            return false;
        };
        let Some(index) = leaf.index_of_title(value_title) else {
            return false;
        };
        leaf.default_index = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::{Point, Size};

    use crate::config::{Color, Font, MenuConfig};
    use crate::draw::Drawer;
    use crate::menu::{ArrayItem, Menu};

    struct Null;

    impl Drawer for Null {
        fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}

        fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}

        fn measure_text(&self, _: &str, _: &Font) -> Size {
            Size::new(10.0, 10.0)
        }
    }

    static QUALITY: [&str; 3] = ["Low", "Medium", "High"];
    static LEVELS: [u8; 3] = [0, 1, 2];

    fn saved(menu: &Menu<'_, Null>) -> Vec<(String, String)> {
        let mut out = Vec::new();
        menu.save(|path, value| out.push((path.to_string(), value.to_string())));
        out
    }

    #[test]
    fn only_overrides_are_saved() {
        let mut menu = Menu::new(MenuConfig::default(), Null, 16);
        menu.create_array_item(None, "Gfx/Shadows", ArrayItem::new(&QUALITY, &LEVELS, 1));
        menu.create_array_item(None, "Gfx/Textures", ArrayItem::new(&QUALITY, &LEVELS, 1));
        assert!(saved(&menu).is_empty());

        menu.load_item("Gfx/Textures", "High");
        assert_eq!(saved(&menu), [("Gfx/Textures".into(), "High".into())]);

        assert!(menu.set_default_value("Gfx/Textures", "High"));
        assert!(saved(&menu).is_empty());
        assert!(!menu.set_default_value("Gfx/Textures", "Ultra"));
        assert!(!menu.set_default_value("Gfx/Missing", "High"));
    }

    #[test]
    fn load_before_create_is_applied_on_create() {
        let calls = Cell::new(0);
        let on_changed = |_: &tweakmenu_tree::ItemChange<'_>| calls.set(calls.get() + 1);
        let mut menu = Menu::new(MenuConfig::default(), Null, 16);

        menu.load_item("Gfx/Shadows", "Medium");
        let placeholder = menu.get_item("Gfx/Shadows").unwrap();
        assert!(menu.tree().get(placeholder).unwrap().is_placeholder());
        assert_eq!(saved(&menu), [("Gfx/Shadows".into(), "Medium".into())]);

        let id = menu
            .create_array_item(
                None,
                "Gfx/Shadows",
                ArrayItem::new(&QUALITY, &LEVELS, 1).on_changed(&on_changed),
            )
            .unwrap();
        assert_eq!(id, placeholder);
        let leaf = menu.tree().leaf(id).unwrap();
        assert_eq!(leaf.active_index, 1);
        assert_eq!(leaf.hot_index, 1);
        assert_eq!(leaf.pending_value, None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn loaded_paths_stay_hidden_until_defined() {
        let mut menu = Menu::new(MenuConfig::default(), Null, 16);
        menu.create_array_item(None, "Audio/Music", ArrayItem::new(&QUALITY, &LEVELS, 1));
        menu.load_item("Gfx/Shadows", "High");
        let gfx = menu.get_item("Gfx").unwrap();
        let audio = menu.get_item("Audio").unwrap();
        assert!(!menu.tree().is_shown(gfx));
        assert_eq!(menu.total_height(), 2.0 * menu.config().item_height);

        menu.move_to_parent();
        assert_eq!(menu.hot_item(), audio);
        menu.move_sibling_next();
        assert_eq!(menu.hot_item(), audio, "the placeholder folder is not selectable");

        menu.create_array_item(None, "Gfx/Shadows", ArrayItem::new(&QUALITY, &LEVELS, 1));
        assert!(menu.tree().is_shown(gfx));
        menu.move_sibling_next();
        assert_eq!(menu.hot_item(), gfx);
    }

    #[test]
    fn unknown_titles_and_folders_are_ignored() {
        let mut menu = Menu::new(MenuConfig::default(), Null, 16);
        let id = menu
            .create_array_item(None, "Gfx/Shadows", ArrayItem::new(&QUALITY, &LEVELS, 1))
            .unwrap();
        menu.load_item("Gfx/Shadows", "Ultra");
        menu.load_item("Gfx", "High");
        assert_eq!(menu.tree().leaf(id).unwrap().active_index, 0);
        assert!(menu.tree().get(menu.get_item("Gfx").unwrap()).unwrap().is_folder());
    }
}
