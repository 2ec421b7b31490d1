// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close animation.

/// Quadratic ease-out of `t` over `duration`, from `start` by `change`.
///
/// `t` is clamped to `[0, duration]`.
#[inline]
pub fn ease_out(t: f64, start: f64, change: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return start + change;
    }
    let t = (t / duration).clamp(0.0, 1.0);
    -change * t * (t - 2.0) + start
}

/// Openness state machine.
///
/// A timer in `[0, 1]` moves towards 1 while open and towards 0 while closed. The visible
/// openness is the eased timer, so the panel slows down as it settles. Reversing direction
/// mid-way continues from the current timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Openness {
    timer: f64,
    open: bool,
}

impl Openness {
    /// A closed, fully retracted panel.
    pub const fn closed() -> Self {
        Self {
            timer: 0.0,
            open: false,
        }
    }

    /// Returns `true` if the panel is open or opening.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Starts opening or closing.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Raw animation progress in `[0, 1]`.
    pub const fn timer(&self) -> f64 {
        self.timer
    }

    /// Eased openness in `[0, 1]`.
    pub fn value(&self) -> f64 {
        ease_out(self.timer, 0.0, 1.0, 1.0)
    }

    /// Returns `true` once the timer has reached the end it is moving towards.
    pub fn is_settled(&self) -> bool {
        if self.open {
            self.timer >= 1.0
        } else {
            self.timer <= 0.0
        }
    }

    /// Advances the timer by `dt` seconds at `speed` units per second.
    pub fn update(&mut self, dt: f64, speed: f64) {
        let step = dt.max(0.0) * speed;
        self.timer = if self.open {
            (self.timer + step).min(1.0)
        } else {
            (self.timer - step).max(0.0)
        };
    }
}
