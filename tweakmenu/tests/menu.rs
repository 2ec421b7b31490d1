// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end menu behavior through the public API.

use std::cell::RefCell;

use kurbo::{Point, Size};
use tweakmenu::tweakmenu_tree::MAX_TITLE_LENGTH;
use tweakmenu::{ArrayItem, Color, Drawer, Font, ItemChange, Menu, MenuConfig, Slot};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Text(String, Point, Color),
    Rect(Point, Size, Color),
}

/// Records draw calls; every character is 10 pixels wide.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Drawer for Recorder {
    fn draw_text(&mut self, text: &str, position: Point, color: Color, _: &Font) {
        self.calls.push(Call::Text(text.to_string(), position, color));
    }

    fn draw_rect(&mut self, position: Point, size: Size, color: Color) {
        self.calls.push(Call::Rect(position, size, color));
    }

    fn measure_text(&self, text: &str, _: &Font) -> Size {
        #[allow(clippy::cast_precision_loss, reason = "Test strings are short.")]
        let width = text.chars().count() as f64 * 10.0;
        Size::new(width, 16.0)
    }
}

impl Recorder {
    fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(text, ..) => Some(text.as_str()),
                Call::Rect(..) => None,
            })
            .collect()
    }
}

static ON_OFF: [&str; 2] = ["Off", "On"];
static ON_OFF_VALUES: [u8; 2] = [0, 1];
static QUALITY: [&str; 3] = ["Low", "Medium", "High"];
static QUALITY_VALUES: [u8; 3] = [0, 1, 2];

fn menu<'a>() -> Menu<'a, Recorder> {
    Menu::new(MenuConfig::default(), Recorder::default(), 64)
}

fn on_off() -> ArrayItem<'static> {
    ArrayItem::new(&ON_OFF, &ON_OFF_VALUES, 1)
}

fn quality() -> ArrayItem<'static> {
    ArrayItem::new(&QUALITY, &QUALITY_VALUES, 1)
}

fn hot_title<'m>(menu: &'m Menu<'_, Recorder>) -> &'m str {
    menu.tree().get(menu.hot_item()).unwrap().title()
}

#[test]
fn flag_commit_fires_one_callback() {
    let changes = RefCell::new(Vec::new());
    let on_changed = |change: &ItemChange<'_>| {
        changes
            .borrow_mut()
            .push((change.value_title.to_string(), change.value_index, change.value.to_vec()));
    };
    let mut menu = menu();
    let flag = menu
        .create_bool_item("Test/Flag", "A test flag.", Some(&on_changed), 0)
        .unwrap();
    assert_eq!(menu.hot_item(), flag);

    menu.move_to_child();
    assert!(menu.tree().leaf(flag).unwrap().is_active);
    menu.move_sibling_next();
    assert!(changes.borrow().is_empty(), "moving the highlight does not commit");
    menu.move_to_child();

    assert_eq!(*changes.borrow(), [("True".to_string(), 1, vec![1])]);
    assert_eq!(menu.tree().leaf(flag).unwrap().active_index, 1);
}

#[test]
fn next_leaf_wraps_around() {
    let mut menu = menu();
    for path in ["A", "B", "C"] {
        menu.create_array_item(None, path, on_off());
    }
    assert_eq!(hot_title(&menu), "A");
    menu.move_to_next_leaf(false);
    assert_eq!(hot_title(&menu), "B");

    let c = menu.get_item("C").unwrap();
    assert!(menu.set_hot_item(c));
    menu.move_to_next_leaf(false);
    assert_eq!(hot_title(&menu), "A");
    menu.move_to_prev_leaf(false);
    assert_eq!(hot_title(&menu), "C");
}

#[test]
fn empty_folders_are_never_selected() {
    let mut menu = menu();
    menu.create_array_item(None, "A", on_off());
    menu.create_folder("Empty/Nested").unwrap();
    menu.create_array_item(None, "Z", on_off());

    menu.move_to_next_leaf(false);
    assert_eq!(hot_title(&menu), "Z");
    menu.move_to_next_leaf(false);
    assert_eq!(hot_title(&menu), "A");
    menu.move_to_prev_leaf(false);
    assert_eq!(hot_title(&menu), "Z");
}

#[test]
fn expanded_leaf_cycles_values() {
    let mut menu = menu();
    let id = menu.create_array_item(None, "Quality", quality()).unwrap();
    menu.create_array_item(None, "Other", on_off());

    menu.move_to_child();
    menu.move_to_prev_leaf(false);
    assert_eq!(menu.hot_item(), id, "the cursor stays on an expanded leaf");
    assert_eq!(menu.tree().leaf(id).unwrap().hot_index, 2);
    menu.move_to_next_leaf(false);
    assert_eq!(menu.tree().leaf(id).unwrap().hot_index, 0);

    menu.move_to_parent();
    assert!(!menu.tree().leaf(id).unwrap().is_active);
    assert_eq!(menu.tree().leaf(id).unwrap().active_index, 0);
}

#[test]
fn folders_remember_their_hot_child() {
    let mut menu = menu();
    for path in ["F/X", "F/Y", "G"] {
        menu.create_array_item(None, path, on_off());
    }
    let y = menu.get_item("F/Y").unwrap();
    menu.set_hot_item(y);
    menu.move_to_parent();
    assert_eq!(hot_title(&menu), "F");
    menu.move_to_parent();
    assert_eq!(hot_title(&menu), "F", "the root is never hot");

    menu.move_sibling_next();
    assert_eq!(hot_title(&menu), "G");
    menu.move_sibling_next();
    assert_eq!(hot_title(&menu), "F");
    menu.move_to_child();
    assert_eq!(menu.hot_item(), y);

    menu.move_to_last();
    assert_eq!(hot_title(&menu), "G");
    menu.move_to_root();
    assert_eq!(hot_title(&menu), "G", "the root remembers its hot child");
    assert!(!menu.set_hot_item(menu.tree().root()));
}

#[test]
fn filter_keeps_matching_leaf_and_ancestors() {
    let mut menu = menu();
    for path in [
        "Test/Flag",
        "Test/Bool with function callback",
        "Debug/Draw bounds",
        "Misc/Volume",
    ] {
        menu.create_array_item(None, path, on_off());
    }
    let all: Vec<_> = menu.tree().descendants().collect();

    menu.set_filtering_enabled(true);
    menu.update_filter("function call");
    let bool_item = menu.get_item("Test/Bool with function callback").unwrap();
    let test = menu.get_item("Test").unwrap();
    let shown: Vec<_> = all
        .iter()
        .copied()
        .filter(|&id| menu.tree().is_shown(id))
        .collect();
    assert_eq!(shown, [test, bool_item]);
    assert_eq!(menu.hot_item(), bool_item, "the cursor moved off the hidden leaf");

    menu.update_filter("");
    assert!(all.iter().all(|&id| menu.tree().is_shown(id)));

    menu.update_filter("nothing matches this");
    assert_eq!(menu.hot_item(), bool_item, "no visible leaf leaves the cursor alone");
    menu.filter_backspace();
    assert_eq!(menu.filter().text(), "nothing matches thi");
    menu.update_filter("");
    menu.filter_backspace();
    assert!(!menu.is_filtering_enabled());
}

#[test]
fn wheel_scrolling_stops_at_the_end_of_the_tree() {
    let config = MenuConfig {
        size: Size::new(400.0, 300.0),
        ..MenuConfig::default()
    };
    let mut menu = Menu::new(config, Recorder::default(), 64);
    for i in 0..40 {
        menu.create_array_item(None, &format!("Item{i:02}"), on_off());
    }
    // 40 rows of 30 px, keeping the last row 70% of 300 px from the bottom edge.
    let lower = -(40.0 * 30.0 - 0.7 * 300.0);
    for _ in 0..200 {
        menu.scroll(-0.05);
        assert!(menu.tree_top() >= lower - 1e-9, "scrolled past {lower}");
    }
    assert!(menu.tree_top() - lower < 1e-9);

    menu.scroll(100.0);
    assert!(menu.tree_top() - 0.3 * 300.0 < 1e-9, "upper bound holds too");
}

#[test]
fn long_titles_are_truncated_but_resolve() {
    const LONG: &str = "This title is far too long to be stored in full";
    let mut menu = menu();
    let path = format!("Folder/{LONG}");
    let id = menu.create_array_item(None, &path, quality()).unwrap();
    let title = menu.tree().get(id).unwrap().title();
    assert!(title.ends_with(".."));
    assert!(title.len() <= MAX_TITLE_LENGTH);
    assert_eq!(menu.get_item(&path), Some(id));

    menu.load_item(&path, "High");
    let mut saved = Vec::new();
    menu.save(|path, value| saved.push((path.to_string(), value.to_string())));
    assert_eq!(saved.len(), 1);

    let mut other = self::menu();
    let other_id = other.create_array_item(None, &path, quality()).unwrap();
    for (path, value) in &saved {
        if *value == "High" {
            other.load_item(path, "High");
        }
    }
    assert_eq!(other.tree().leaf(other_id).unwrap().active_index, 2);
}

#[test]
fn presets_load_their_values() {
    static PATHS: [&str; 3] = ["Gfx/Shadows", "Gfx/Textures", "Presets/Ultra"];
    static TITLES: [&str; 3] = ["High", "High", "Apply"];
    let mut menu = menu();
    let shadows = menu.create_array_item(None, "Gfx/Shadows", quality()).unwrap();
    let textures = menu.create_array_item(None, "Gfx/Textures", quality()).unwrap();
    let preset = menu
        .create_preset_item("Presets/Ultra", "Everything on high.", &PATHS, &TITLES)
        .unwrap();

    menu.set_hot_item(preset);
    menu.activate_direct();
    assert_eq!(menu.tree().leaf(shadows).unwrap().active_index, 2);
    assert_eq!(menu.tree().leaf(textures).unwrap().active_index, 2);
    assert!(!menu.tree().leaf(preset).unwrap().is_overridden());
}

#[test]
fn removal_moves_the_cursor_out() {
    let mut menu = menu();
    for path in ["A/X", "A/Y", "B"] {
        menu.create_array_item(None, path, on_off());
    }
    let x = menu.get_item("A/X").unwrap();
    assert_eq!(menu.hot_item(), x);

    menu.remove_item("Missing");
    menu.remove_item("A");
    assert!(!menu.tree().is_alive(x));
    assert_eq!(menu.get_item("A/X"), None);
    assert_eq!(hot_title(&menu), "B");

    menu.remove_item("B");
    assert_eq!(menu.hot_item(), menu.tree().root());
    assert_eq!(menu.tree().arena().len(), 1, "only the root is left");

    // Freed slots are reused.
    menu.create_array_item(None, "C", on_off());
    assert_eq!(hot_title(&menu), "C");
}

#[test]
fn redefining_a_leaf_keeps_what_still_fits() {
    let mut menu = menu();
    let id = menu.create_array_item(None, "Setting", quality()).unwrap();
    menu.load_item("Setting", "High");
    assert_eq!(menu.tree().leaf(id).unwrap().active_index, 2);

    let again = menu.create_array_item(None, "Setting", on_off()).unwrap();
    assert_eq!(again, id);
    let leaf = menu.tree().leaf(id).unwrap();
    assert_eq!(leaf.num_values(), 2);
    assert_eq!(leaf.active_index, 1);

    assert!(menu.create_array_item(None, "Setting/Child", on_off()).is_none());
}

#[test]
fn pointer_picks_rows() {
    let mut menu = menu();
    for path in ["A", "B", "C"] {
        menu.create_array_item(None, path, on_off());
    }
    let b = menu.get_item("B").unwrap();
    let top = menu.tree_top();
    assert_eq!(menu.hot_item_at_height(top + 35.0), Some(b));
    assert_eq!(hot_title(&menu), "A", "picking does not move the cursor");

    menu.activate_at_height(top + 35.0);
    assert_eq!(menu.hot_item(), b);
    assert!(menu.tree().leaf(b).unwrap().is_active);

    // Rows: A, B, B/Off, B/On, C.
    let top = menu.tree_top();
    menu.activate_at_height(top + 95.0);
    assert_eq!(menu.tree().leaf(b).unwrap().active_index, 1);

    assert_eq!(menu.hot_item_at_height(-1000.0), menu.get_item("A"));
    assert_eq!(menu.hot_item_at_height(1000.0), menu.get_item("C"));
}

#[test]
fn drawing_follows_openness() {
    let mut menu = menu();
    menu.create_bool_item("Test/Flag", "", None, 0);

    menu.draw(0.016);
    assert!(menu.drawer().calls.is_empty(), "a closed menu draws nothing");

    menu.set_open(true);
    menu.update(0.125);
    menu.draw(0.016);
    let Call::Rect(position, size, _) = menu.drawer().calls[0].clone() else {
        panic!("the panel background comes first");
    };
    assert_eq!(position, Point::new(-125.0, 0.0), "three quarters slid in");
    assert_eq!(size, MenuConfig::default().size);
    assert_eq!(menu.drawer().texts(), ["Test", "Flag", "False"]);

    menu.drawer_mut().calls.clear();
    menu.update(1.0);
    menu.set_filtering_enabled(true);
    menu.update_filter("Fl");
    menu.draw(0.016);
    let texts = menu.drawer().texts();
    assert!(texts.contains(&"Filter:"));
    assert!(texts.contains(&"Fl"));
}

#[test]
fn overridden_values_use_their_own_color() {
    let theme = MenuConfig::default().theme;
    let mut menu = menu();
    menu.create_array_item(None, "Quality", quality());
    menu.set_default_value("Quality", "Medium");
    menu.set_open(true);
    menu.update(1.0);
    menu.draw(0.016);
    let value_color = |menu: &Menu<'_, Recorder>, value: &str| {
        menu.drawer().calls.iter().find_map(|c| match c {
            Call::Text(text, _, color) if text == value => Some(*color),
            _ => None,
        })
    };
    assert_eq!(value_color(&menu, "Low"), Some(theme.value_overridden));

    menu.load_item("Quality", "Medium");
    menu.drawer_mut().calls.clear();
    menu.draw(0.016);
    assert_eq!(value_color(&menu, "Medium"), Some(theme.value_default));
}

#[test]
fn caller_slots_back_a_menu() {
    let mut slots = [Slot::VACANT; 4];
    let mut menu = Menu::with_slots(MenuConfig::default(), Recorder::default(), &mut slots);
    menu.create_array_item(None, "A/B", on_off()).unwrap();
    menu.create_array_item(None, "C", on_off()).unwrap();
    assert_eq!(menu.tree().arena().len(), 4);
    assert_eq!(menu.tree().arena().capacity(), 4);
}
