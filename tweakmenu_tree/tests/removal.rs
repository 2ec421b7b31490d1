// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subtree removal against a nearly full free list.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tweakmenu_tree::{FREE_LIST_CAPACITY, ItemId, Tree};

/// A tree holding `F/A` and `F/B` with `queued` released slots waiting for reuse.
fn tree_with_queued_slots(queued: usize) -> (Tree<'static>, ItemId) {
    let mut tree = Tree::with_capacity(4 + queued);
    tree.get_or_create(None, "F/A", true).unwrap();
    tree.get_or_create(None, "F/B", true).unwrap();
    let fillers: Vec<ItemId> = (0..queued)
        .map(|i| tree.get_or_create(None, &format!("L{i}"), true).unwrap())
        .collect();
    for id in fillers {
        tree.remove(id);
    }
    assert_eq!(tree.arena().free_count(), queued);
    let f = tree.find("F").unwrap();
    (tree, f)
}

#[test]
fn subtree_that_fits_is_released() {
    let (mut tree, f) = tree_with_queued_slots(FREE_LIST_CAPACITY - 3);
    tree.remove(f);
    assert_eq!(tree.arena().free_count(), FREE_LIST_CAPACITY);
    assert_eq!(tree.find("F"), None);
    assert_eq!(tree.first_child(tree.root()), None);
}

#[test]
fn subtree_that_does_not_fit_leaves_the_tree_untouched() {
    let (mut tree, f) = tree_with_queued_slots(FREE_LIST_CAPACITY - 2);
    let a = tree.find("F/A").unwrap();
    let b = tree.find("F/B").unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| tree.remove(f)));
    let message = result.unwrap_err();
    let message = message
        .downcast_ref::<String>()
        .map(String::as_str)
        .unwrap_or_default();
    assert!(message.contains("free list full"), "got {message:?}");

    assert!(tree.is_alive(f) && tree.is_alive(a) && tree.is_alive(b));
    assert_eq!(tree.find("F"), Some(f));
    assert_eq!(tree.find("F/B"), Some(b));
    assert_eq!(tree.first_child(tree.root()), Some(f));
    assert_eq!(tree.arena().free_count(), FREE_LIST_CAPACITY - 2);
}
