// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping polled input onto menu operations.
//!
//! The host implements [`InputDevice`] over whatever it polls (keyboard, mouse, gamepad, or
//! all of them merged) and calls [`InputController::update`] once per frame.

use bitflags::bitflags;
use kurbo::{Rect, Vec2};
use tweakmenu_tree::{InlineStr, Item, MAX_FILTER_LENGTH};

use crate::draw::Drawer;
use crate::menu::Menu;

/// Seconds a navigation button must be held before it starts repeating.
pub const KEY_REPEAT_DELAY: f64 = 0.3;
/// Seconds between repeats once repeating.
pub const KEY_REPEAT_INTERVAL: f64 = 0.05;
/// Stick deflection below which the stick is ignored.
pub const STICK_DEAD_ZONE: f64 = 0.4;
/// Seconds the stick must stay deflected before it starts repeating.
pub const STICK_REPEAT_DELAY: f64 = 0.25;
/// Seconds between stick repeats once repeating.
pub const STICK_REPEAT_INTERVAL: f64 = 0.05;
/// Focus height change per unit of wheel movement.
pub const WHEEL_SCROLL: f64 = 0.05;

bitflags! {
    /// Logical buttons. The host decides which physical inputs map to which.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u32 {
        /// Previous leaf.
        const UP = 1 << 0;
        /// Next leaf.
        const DOWN = 1 << 1;
        /// Out of a folder or an expanded leaf.
        const LEFT = 1 << 2;
        /// Into a folder or leaf.
        const RIGHT = 1 << 3;
        /// First top-level item.
        const HOME = 1 << 4;
        /// Last top-level item.
        const END = 1 << 5;
        /// Enter, expand, or commit.
        const ACCEPT = 1 << 6;
        /// Commit the highlighted value without expanding.
        const DIRECT = 1 << 7;
        /// Collapse an expanded leaf, otherwise close the menu.
        const BACK = 1 << 8;
        /// Close the menu.
        const CLOSE = 1 << 9;
        /// Open the menu.
        const OPEN = 1 << 10;
        /// Open a closed menu, close an open one.
        const TOGGLE = 1 << 11;
        /// Delete the last filter character.
        const BACKSPACE = 1 << 12;
        /// Clear the filter text.
        const CLEAR_FILTER = 1 << 13;
        /// Modifier turning [`Buttons::UP`]/[`Buttons::DOWN`] into sibling moves.
        const LONG_MOVE = 1 << 14;
        /// Previous sibling.
        const PREV_PAGE = 1 << 15;
        /// Next sibling.
        const NEXT_PAGE = 1 << 16;
        /// Primary pointer button.
        const CLICK = 1 << 17;
    }
}

/// Analog inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scroll wheel movement this frame; positive `y` scrolls the tree down.
    Wheel,
    /// Navigation stick in `[-1, 1]`; positive `x` points right and positive `y` up.
    Stick,
    /// Pointer position in screen pixels, `y` growing downwards.
    Pointer,
}

/// Input state polled once per frame.
pub trait InputDevice {
    /// Returns `true` if any of `buttons` went down this frame.
    fn pressed(&self, buttons: Buttons) -> bool;

    /// Returns `true` if any of `buttons` is down.
    fn held(&self, buttons: Buttons) -> bool;

    /// Current value of `axis`.
    fn axis(&self, axis: Axis) -> Vec2;

    /// Returns `true` if any button went up this frame.
    fn any_released(&self) -> bool;

    /// Returns `false` while the device should be ignored, e.g. the window lost focus.
    fn is_active(&self) -> bool {
        true
    }

    /// Characters typed this frame.
    fn typed_text(&self) -> &str {
        ""
    }
}

/// Turns [`InputDevice`] state into menu operations, with key and stick repeat.
///
/// Holding a navigation button acts once, then again after [`KEY_REPEAT_DELAY`] seconds,
/// then every [`KEY_REPEAT_INTERVAL`] seconds until any button is released. At most one
/// navigation action happens per frame. Typing printable characters edits the filter,
/// enabling it when needed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputController {
    key_timer: Option<f64>,
    stick_x_latched: bool,
    stick_y_timer: Option<f64>,
}

impl InputController {
    /// A controller with no buttons held.
    pub const fn new() -> Self {
        Self {
            key_timer: None,
            stick_x_latched: false,
            stick_y_timer: None,
        }
    }

    /// Forgets held buttons and stick state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies this frame's input to `menu`. `dt` is the frame time in seconds.
    pub fn update<D, I>(&mut self, menu: &mut Menu<'_, D>, device: &I, dt: f64)
    where
        D: Drawer,
        I: InputDevice + ?Sized,
    {
        if !device.is_active() {
            self.reset();
            return;
        }
        if device.any_released() {
            self.key_timer = None;
        }

        if menu.is_open() {
            self.navigate(menu, device);
            if menu.is_open() {
                self.edit_filter(menu, device);
                self.pointer(menu, device);
            }
        } else {
            self.stick_x_latched = false;
            self.stick_y_timer = None;
            if device.pressed(Buttons::OPEN | Buttons::TOGGLE) {
                menu.set_open(true);
            }
        }

        if let Some(timer) = &mut self.key_timer {
            *timer += dt;
        }
        if let Some(timer) = &mut self.stick_y_timer {
            *timer += dt;
        }
    }

    /// Returns `true` on the frames a held `buttons` should act.
    fn repeat<I: InputDevice + ?Sized>(&mut self, device: &I, buttons: Buttons) -> bool {
        if !device.held(buttons) {
            return false;
        }
        match self.key_timer {
            None => {
                self.key_timer = Some(0.0);
                true
            }
            Some(timer) if timer > KEY_REPEAT_DELAY => {
                self.key_timer = Some(KEY_REPEAT_DELAY - KEY_REPEAT_INTERVAL);
                true
            }
            Some(_) => false,
        }
    }

    /// `1` right, `-1` left, once per deflection.
    fn stick_x(&mut self, x: f64) -> i8 {
        if x > STICK_DEAD_ZONE || x < -STICK_DEAD_ZONE {
            if self.stick_x_latched {
                return 0;
            }
            self.stick_x_latched = true;
            if x > 0.0 { 1 } else { -1 }
        } else {
            self.stick_x_latched = false;
            0
        }
    }

    /// `1` up, `-1` down, repeating while deflected.
    fn stick_y(&mut self, y: f64) -> i8 {
        if !(y > STICK_DEAD_ZONE || y < -STICK_DEAD_ZONE) {
            self.stick_y_timer = None;
            return 0;
        }
        match self.stick_y_timer {
            Some(timer) if timer < 0.0 => return 0,
            Some(_) => self.stick_y_timer = Some(-STICK_REPEAT_INTERVAL),
            None => self.stick_y_timer = Some(-STICK_REPEAT_DELAY),
        }
        if y > 0.0 { 1 } else { -1 }
    }

    fn navigate<D, I>(&mut self, menu: &mut Menu<'_, D>, device: &I)
    where
        D: Drawer,
        I: InputDevice + ?Sized,
    {
        let stick = device.axis(Axis::Stick);
        let stick_x = self.stick_x(stick.x);
        let stick_y = self.stick_y(stick.y);
        let long_move = device.held(Buttons::LONG_MOVE);

        if self.repeat(device, Buttons::UP) || stick_y > 0 {
            menu.move_to_prev_leaf(long_move);
            menu.reset_focus();
        } else if self.repeat(device, Buttons::DOWN) || stick_y < 0 {
            menu.move_to_next_leaf(long_move);
            menu.reset_focus();
        } else if self.repeat(device, Buttons::HOME) {
            menu.move_to_root();
            menu.reset_focus();
        } else if self.repeat(device, Buttons::END) {
            menu.move_to_last();
            menu.reset_focus();
        } else if self.repeat(device, Buttons::PREV_PAGE) {
            menu.move_to_prev_leaf(true);
            menu.reset_focus();
        } else if self.repeat(device, Buttons::NEXT_PAGE) {
            menu.move_to_next_leaf(true);
            menu.reset_focus();
        } else if device.pressed(Buttons::LEFT) {
            let hot = menu.tree().get(menu.hot_item());
            let expanded = hot.and_then(Item::as_leaf).is_some_and(|leaf| leaf.is_active);
            if expanded || hot.is_some_and(Item::is_folder) {
                menu.move_to_parent();
            }
        } else if device.pressed(Buttons::BACK) || stick_x < 0 {
            let expanded = menu
                .tree()
                .leaf(menu.hot_item())
                .is_some_and(|leaf| leaf.is_active);
            if expanded {
                menu.move_to_parent();
            } else {
                menu.set_open(false);
            }
        } else if device.pressed(Buttons::CLOSE | Buttons::TOGGLE) {
            menu.set_open(false);
        } else if device.pressed(Buttons::RIGHT | Buttons::ACCEPT) || stick_x > 0 {
            menu.move_to_child();
        } else if device.pressed(Buttons::DIRECT) {
            menu.activate_direct();
        }
    }

    fn edit_filter<D, I>(&mut self, menu: &mut Menu<'_, D>, device: &I)
    where
        D: Drawer,
        I: InputDevice + ?Sized,
    {
        if self.repeat(device, Buttons::BACKSPACE) {
            menu.filter_backspace();
        }
        if self.repeat(device, Buttons::CLEAR_FILTER) {
            menu.update_filter("");
            return;
        }

        let typed = device.typed_text();
        if typed.is_empty() {
            return;
        }
        let mut text = InlineStr::<MAX_FILTER_LENGTH>::from_str_truncated(menu.filter().text());
        let mut appended = false;
        for c in typed.chars().filter(|c| (' '..='}').contains(c)) {
            if !text.push(c) {
                break;
            }
            appended = true;
        }
        if appended {
            if !menu.is_filtering_enabled() {
                menu.set_filtering_enabled(true);
            }
            menu.update_filter(text.as_str());
        }
    }

    fn pointer<D, I>(&mut self, menu: &mut Menu<'_, D>, device: &I)
    where
        D: Drawer,
        I: InputDevice + ?Sized,
    {
        let position = device.axis(Axis::Pointer).to_point();
        let config = menu.config();
        let panel = Rect::from_origin_size(config.top_left, config.size);
        if !panel.contains(position) {
            return;
        }
        let top = config.top_left.y;

        let wheel = device.axis(Axis::Wheel).y;
        if wheel != 0.0 {
            menu.scroll(wheel * WHEEL_SCROLL);
        }
        if self.repeat(device, Buttons::CLICK) {
            menu.activate_at_height(position.y - top);
        }
    }
}
