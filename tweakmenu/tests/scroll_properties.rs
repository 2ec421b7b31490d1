// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the focus band under arbitrary scrolling and cursor movement.

use kurbo::{Point, Size};
use proptest::prelude::*;
use tweakmenu::{ArrayItem, Color, Drawer, Font, Menu, MenuConfig};

struct Fixed;

impl Drawer for Fixed {
    fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}

    fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}

    fn measure_text(&self, _: &str, _: &Font) -> Size {
        Size::new(50.0, 16.0)
    }
}

static ON_OFF: [&str; 2] = ["Off", "On"];
static VALUES: [u8; 2] = [0, 1];

#[derive(Clone, Copy, Debug)]
enum Op {
    Scroll(f64),
    Next,
    Prev,
    Expand,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-2.0_f64..2.0).prop_map(Op::Scroll),
        Just(Op::Next),
        Just(Op::Prev),
        Just(Op::Expand),
    ]
}

fn build(leaves: usize, viewport: f64) -> Menu<'static, Fixed> {
    let config = MenuConfig {
        size: Size::new(400.0, viewport),
        ..MenuConfig::default()
    };
    let mut menu = Menu::new(config, Fixed, leaves + 8);
    for i in 0..leaves {
        let path = format!("Group{}/Leaf{i}", i % 3);
        menu.create_array_item(None, &path, ArrayItem::new(&ON_OFF, &VALUES, 1));
    }
    menu
}

proptest! {
    #[test]
    fn tree_stays_inside_the_focus_band(
        leaves in 1_usize..60,
        viewport in 100.0_f64..1000.0,
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let mut menu = build(leaves, viewport);
        for op in ops {
            match op {
                Op::Scroll(delta) => menu.scroll(delta),
                Op::Next => menu.move_to_next_leaf(false),
                Op::Prev => menu.move_to_prev_leaf(false),
                Op::Expand => menu.move_to_child(),
            }
            let default = menu.config().focus_height;
            let top = menu.tree_top();
            let upper = default * viewport;
            let lower = -(menu.total_height() - (1.0 - default) * viewport);
            prop_assert!(top <= upper + 1e-6, "tree top {top} below band top {upper}");
            if lower <= upper {
                prop_assert!(top >= lower - 1e-6, "tree top {top} above band bottom {lower}");
            }
        }
    }
}
