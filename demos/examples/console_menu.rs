// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A debug menu printed to the terminal, driven by a scripted input sequence.
//!
//! This example shows how to:
//! - implement `Drawer` over a text sink,
//! - create folders, array items, bool items, and a preset,
//! - feed `InputController` from a scripted `InputDevice`,
//! - save overridden values and load them into a fresh menu.
//!
//! Run:
//! - `cargo run -p tweakmenu_demos --example console_menu`

use std::cell::Cell;

use kurbo::{Point, Size, Vec2};
use tweakmenu::{
    ArrayItem, Axis, Buttons, Color, Drawer, Font, InputController, InputDevice, ItemChange,
    Menu, MenuConfig,
};

/// Collects text rows by screen line and prints them as a frame.
#[derive(Default)]
struct ConsoleDrawer {
    lines: Vec<(f64, String)>,
}

impl ConsoleDrawer {
    fn present(&mut self) {
        self.lines
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        println!("+------------------------------------------+");
        for (_, line) in self.lines.drain(..) {
            println!("| {line:<40} |");
        }
        println!("+------------------------------------------+");
    }
}

impl Drawer for ConsoleDrawer {
    fn draw_text(&mut self, text: &str, position: Point, _: Color, _: &Font) {
        // One character per 10 px, rows keyed by their top edge.
        let column = (position.x / 10.0).max(0.0) as usize;
        match self.lines.iter_mut().find(|(y, _)| *y == position.y) {
            Some((_, line)) => {
                while line.len() < column {
                    line.push(' ');
                }
                line.push_str(text);
            }
            None => self
                .lines
                .push((position.y, format!("{:column$}{text}", ""))),
        }
    }

    fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}

    fn measure_text(&self, text: &str, _: &Font) -> Size {
        Size::new(text.chars().count() as f64 * 10.0, 16.0)
    }
}

/// One frame of scripted input.
#[derive(Default)]
struct Frame {
    pressed: Buttons,
    text: &'static str,
}

impl InputDevice for Frame {
    fn pressed(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }

    fn held(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }

    fn axis(&self, axis: Axis) -> Vec2 {
        match axis {
            // Off the panel, so the pointer never acts.
            Axis::Pointer => Vec2::new(-1.0, -1.0),
            Axis::Wheel | Axis::Stick => Vec2::ZERO,
        }
    }

    fn any_released(&self) -> bool {
        true
    }

    fn typed_text(&self) -> &str {
        self.text
    }
}

static QUALITY: [&str; 4] = ["Off", "Low", "Medium", "High"];
static QUALITY_VALUES: [u32; 4] = [0, 512, 1024, 2048];
static PRESET_PATHS: [&str; 2] = ["Rendering/Shadows", "Rendering/Wireframe"];
static PRESET_TITLES: [&str; 2] = ["High", "False"];

fn quality_bytes() -> &'static [u8] {
    static BYTES: [u8; 16] = {
        let mut out = [0; 16];
        let mut i = 0;
        while i < 4 {
            let b = QUALITY_VALUES[i].to_le_bytes();
            out[i * 4] = b[0];
            out[i * 4 + 1] = b[1];
            out[i * 4 + 2] = b[2];
            out[i * 4 + 3] = b[3];
            i += 1;
        }
        out
    };
    &BYTES
}

fn build<'a>(on_changed: &'a dyn Fn(&ItemChange<'_>)) -> Menu<'a, ConsoleDrawer> {
    let config = MenuConfig {
        size: Size::new(420.0, 240.0),
        ..MenuConfig::default()
    };
    let mut menu = Menu::new(config, ConsoleDrawer::default(), 32);
    menu.create_array_item(
        None,
        "Rendering/Shadows",
        ArrayItem::new(&QUALITY, quality_bytes(), 4)
            .description("Shadow map resolution.")
            .on_changed(on_changed),
    );
    menu.create_bool_item("Rendering/Wireframe", "Draw edges only.", Some(on_changed), 0);
    menu.create_bool_item("Audio/Mute", "", Some(on_changed), 0);
    menu.create_preset_item(
        "Presets/Screenshot",
        "High shadows, no wireframe.",
        &PRESET_PATHS,
        &PRESET_TITLES,
    );
    menu
}

fn main() {
    let commits = Cell::new(0);
    let on_changed = |change: &ItemChange<'_>| {
        commits.set(commits.get() + 1);
        println!("changed {} -> {}", change.title, change.value_title);
    };

    let mut menu = build(&on_changed);
    let mut input = InputController::new();
    let script = [
        Frame {
            pressed: Buttons::OPEN,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::ACCEPT,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::DOWN,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::DOWN,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::ACCEPT,
            ..Frame::default()
        },
        Frame {
            text: "Mute",
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::ACCEPT,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::DOWN,
            ..Frame::default()
        },
        Frame {
            pressed: Buttons::ACCEPT,
            ..Frame::default()
        },
    ];

    let dt = 1.0 / 60.0;
    for frame in &script {
        input.update(&mut menu, frame, dt);
        menu.update(1.0);
        menu.draw(dt);
        menu.drawer_mut().present();
    }

    let mut saved = Vec::new();
    menu.save(|path, value| {
        println!("save {path} = {value}");
        saved.push((path.to_owned(), value.to_owned()));
    });

    let restored = Cell::new(0);
    let count = |_: &ItemChange<'_>| restored.set(restored.get() + 1);
    let mut fresh = build(&count);
    for (path, value) in &saved {
        fresh.load_item(path, value);
    }
    println!(
        "{} commits in the session, {} restored into a fresh menu",
        commits.get(),
        restored.get()
    );
}
