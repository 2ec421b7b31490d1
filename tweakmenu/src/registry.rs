// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed-size table of named menus.

use core::fmt;

use smallvec::SmallVec;
use thiserror::Error;
use tweakmenu_tree::InlineStr;

use crate::draw::Drawer;
use crate::menu::Menu;

/// Most menus a [`MenuRegistry`] holds.
pub const MAX_MENUS: usize = 8;
/// Longest menu id in bytes; longer ids are cut.
pub const MAX_MENU_ID_LENGTH: usize = 32;
/// Id used when none is given.
pub const DEFAULT_MENU_ID: &str = "default";

/// A menu id.
pub type MenuId = InlineStr<MAX_MENU_ID_LENGTH>;

/// Why a menu could not be registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Every entry is taken.
    #[error("menu registry is full ({capacity} menus)")]
    Full {
        /// Number of entries.
        capacity: usize,
    },
    /// A menu with this id exists.
    #[error("a menu with id `{0}` already exists")]
    DuplicateId(MenuId),
}

struct Entry<'a, D> {
    id: MenuId,
    menu: Menu<'a, D>,
}

/// Up to [`MAX_MENUS`] independent menus addressed by id.
///
/// Lookups with `None` address [`DEFAULT_MENU_ID`].
///
/// ```rust
/// use kurbo::{Point, Size};
/// use tweakmenu::{Color, Drawer, Font, Menu, MenuConfig, MenuRegistry};
///
/// struct NullDrawer;
///
/// impl Drawer for NullDrawer {
///     fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}
///     fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}
///     fn measure_text(&self, _: &str, _: &Font) -> Size {
///         Size::ZERO
///     }
/// }
///
/// let mut registry = MenuRegistry::new();
/// registry.create(None, Menu::new(MenuConfig::default(), NullDrawer, 16));
/// registry.create(Some("hud"), Menu::new(MenuConfig::default(), NullDrawer, 16));
/// assert!(registry.get(None).is_some());
/// assert!(registry.try_create(Some("hud"), Menu::new(MenuConfig::default(), NullDrawer, 4)).is_err());
/// assert!(registry.destroy(Some("hud")).is_some());
/// assert_eq!(registry.len(), 1);
/// ```
pub struct MenuRegistry<'a, D> {
    entries: SmallVec<[Entry<'a, D>; MAX_MENUS]>,
}

impl<D> fmt::Debug for MenuRegistry<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.id.as_str()))
            .finish()
    }
}

impl<D> Default for MenuRegistry<'_, D> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<'a, D: Drawer> MenuRegistry<'a, D> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered menus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no menus are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers `menu` under `id`.
    pub fn try_create(
        &mut self,
        id: Option<&str>,
        menu: Menu<'a, D>,
    ) -> Result<&mut Menu<'a, D>, RegistryError> {
        let id = MenuId::from_str_truncated(id.unwrap_or(DEFAULT_MENU_ID));
        if self.position(id.as_str()).is_some() {
            return Err(RegistryError::DuplicateId(id));
        }
        if self.entries.len() >= MAX_MENUS {
            return Err(RegistryError::Full {
                capacity: MAX_MENUS,
            });
        }
        self.entries.push(Entry { id, menu });
        let entry = self.entries.last_mut().ok_or(RegistryError::Full {
            capacity: MAX_MENUS,
        })?;
        Ok(&mut entry.menu)
    }

    /// Registers `menu` under `id`.
    ///
    /// # Panics
    ///
    /// Panics if the registry is full or the id is taken.
    pub fn create(&mut self, id: Option<&str>, menu: Menu<'a, D>) -> &mut Menu<'a, D> {
        match self.try_create(id, menu) {
            Ok(menu) => menu,
            Err(err) => panic!("{err}"),
        }
    }

    /// The menu registered under `id`.
    pub fn get(&self, id: Option<&str>) -> Option<&Menu<'a, D>> {
        let index = self.position(id.unwrap_or(DEFAULT_MENU_ID))?;
        Some(&self.entries[index].menu)
    }

    /// Mutable access to the menu registered under `id`.
    pub fn get_mut(&mut self, id: Option<&str>) -> Option<&mut Menu<'a, D>> {
        let index = self.position(id.unwrap_or(DEFAULT_MENU_ID))?;
        Some(&mut self.entries[index].menu)
    }

    /// Unregisters and returns the menu under `id`. The last entry takes its place.
    pub fn destroy(&mut self, id: Option<&str>) -> Option<Menu<'a, D>> {
        let index = self.position(id.unwrap_or(DEFAULT_MENU_ID))?;
        Some(self.entries.swap_remove(index).menu)
    }

    /// Iterates over `(id, menu)` pairs in registration order, as changed by removals.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Menu<'a, D>)> {
        self.entries.iter_mut().map(|e| (e.id.as_str(), &mut e.menu))
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = MenuId::from_str_truncated(id);
        self.entries.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, Font, MenuConfig};
    use kurbo::{Point, Size};

    struct Null;

    impl Drawer for Null {
        fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}

        fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}

        fn measure_text(&self, _: &str, _: &Font) -> Size {
            Size::ZERO
        }
    }

    fn menu() -> Menu<'static, Null> {
        Menu::new(MenuConfig::default(), Null, 4)
    }

    #[test]
    fn none_means_default() {
        let mut registry = MenuRegistry::new();
        registry.create(Some(DEFAULT_MENU_ID), menu());
        assert!(registry.get(None).is_some());
        assert_eq!(
            registry.try_create(None, menu()).err(),
            Some(RegistryError::DuplicateId(MenuId::from_str_truncated("default")))
        );
    }

    #[test]
    fn full_registry_is_an_error() {
        let mut registry = MenuRegistry::new();
        let ids = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for id in ids {
            registry.create(Some(id), menu());
        }
        assert_eq!(
            registry.try_create(Some("i"), menu()).err(),
            Some(RegistryError::Full { capacity: 8 })
        );
    }

    #[test]
    fn destroy_swaps_in_the_last_entry() {
        let mut registry = MenuRegistry::new();
        for id in ["a", "b", "c"] {
            registry.create(Some(id), menu());
        }
        assert!(registry.destroy(Some("a")).is_some());
        assert!(registry.destroy(Some("a")).is_none());
        let ids: alloc::vec::Vec<&str> = registry.iter_mut().map(|(id, _)| id).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn create_panics_on_duplicates() {
        let mut registry = MenuRegistry::new();
        registry.create(Some("a"), menu());
        registry.create(Some("a"), menu());
    }
}
