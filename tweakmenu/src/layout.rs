// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row layout shared by drawing, scrolling, and pointer picking.

use core::ops::ControlFlow;

use tweakmenu_tree::{ItemId, ItemKind, Tree};

use crate::config::MenuConfig;
use crate::draw::{Drawer, WrappedLines};

/// What a row shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum RowKind<'a> {
    /// Folder or leaf title.
    Title,
    /// One wrapped line of an expanded leaf's description.
    Description(&'a str),
    /// One entry of an expanded leaf's value list.
    Value(usize),
}

/// One laid-out row. `y` is measured from the top of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Row<'a> {
    pub(crate) item: ItemId,
    pub(crate) kind: RowKind<'a>,
    pub(crate) depth: usize,
    pub(crate) y: f64,
    pub(crate) height: f64,
}

/// Lays out every shown item below the root: titles first, and under an expanded leaf its
/// wrapped description followed by its values.
pub(crate) struct Layout<'m, 'a, D: ?Sized> {
    pub(crate) tree: &'m Tree<'a>,
    pub(crate) config: &'m MenuConfig,
    pub(crate) drawer: &'m D,
}

impl<'a, D: Drawer + ?Sized> Layout<'_, 'a, D> {
    /// Visits rows top to bottom until `visit` breaks.
    pub(crate) fn walk<B, F>(&self, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(&Row<'a>) -> ControlFlow<B>,
    {
        let mut y = 0.0;
        self.walk_children(self.tree.root(), 0, &mut y, &mut visit)
    }

    fn walk_children<B, F>(
        &self,
        folder: ItemId,
        depth: usize,
        y: &mut f64,
        visit: &mut F,
    ) -> ControlFlow<B>
    where
        F: FnMut(&Row<'a>) -> ControlFlow<B>,
    {
        let item_height = self.config.item_height;
        let emit = |item, kind, y: &mut f64, visit: &mut F| {
            let row = Row {
                item,
                kind,
                depth,
                y: *y,
                height: item_height,
            };
            *y += item_height;
            visit(&row)
        };

        for child in self.tree.children(folder) {
            let Some(item) = self.tree.get(child) else {
                continue;
            };
            if !item.is_shown() {
                continue;
            }
            emit(child, RowKind::Title, y, visit)?;
            match item.kind() {
                ItemKind::Folder(_) => self.walk_children(child, depth + 1, y, visit)?,
                ItemKind::Leaf(leaf) if leaf.is_active => {
                    let lines = WrappedLines::new(
                        self.drawer,
                        leaf.description,
                        self.config.fonts.description,
                        self.description_width(depth),
                    );
                    for line in lines {
                        emit(child, RowKind::Description(line), y, visit)?;
                    }
                    for index in 0..leaf.num_values() {
                        emit(child, RowKind::Value(index), y, visit)?;
                    }
                }
                ItemKind::Leaf(_) => {}
            }
        }
        ControlFlow::Continue(())
    }

    /// Left edge of a row's text relative to the panel.
    pub(crate) fn text_x(&self, row: &Row<'_>) -> f64 {
        let nested = match row.kind {
            RowKind::Title => 0,
            RowKind::Description(_) | RowKind::Value(_) => 1,
        };
        #[allow(
            clippy::cast_precision_loss,
            reason = "Tree depth is far below f64 precision."
        )]
        let level = (row.depth + nested) as f64;
        self.config.padding + level * self.config.indent
    }

    fn description_width(&self, depth: usize) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Tree depth is far below f64 precision."
        )]
        let level = (depth + 1) as f64;
        (self.config.size.width - 2.0 * self.config.padding - level * self.config.indent).max(1.0)
    }

    /// Height of the whole laid-out tree.
    pub(crate) fn total_height(&self) -> f64 {
        let mut total = 0.0;
        let _ = self.walk::<(), _>(|row| {
            total = row.y + row.height;
            ControlFlow::Continue(())
        });
        total
    }

    /// Distance from the top of the tree to the title row of `id`.
    pub(crate) fn offset_of(&self, id: ItemId) -> Option<f64> {
        match self.walk(|row| {
            if row.item == id && row.kind == RowKind::Title {
                ControlFlow::Break(row.y)
            } else {
                ControlFlow::Continue(())
            }
        }) {
            ControlFlow::Break(y) => Some(y),
            ControlFlow::Continue(()) => None,
        }
    }

    /// The row containing `y`, or the nearest row when `y` lies above or below the tree.
    pub(crate) fn row_at(&self, y: f64) -> Option<Row<'a>> {
        let mut last = None;
        let found = self.walk(|row| {
            if y < row.y + row.height {
                return ControlFlow::Break(*row);
            }
            last = Some(*row);
            ControlFlow::Continue(())
        });
        match found {
            ControlFlow::Break(row) => Some(row),
            ControlFlow::Continue(()) => last,
        }
    }
}
