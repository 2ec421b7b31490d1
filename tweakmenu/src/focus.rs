// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state: where the hot row sits in the viewport.

/// Normalized focus offset with a clamped band.
///
/// `height` places the hot row at `height * viewport` pixels below the top of the viewport,
/// so the whole tree starts at `height * viewport - hot_offset`. [`FocusBand::clamp`] keeps
/// the tree from scrolling further down than `default * viewport` from the top, and from
/// scrolling further up than needed to bring its end to `(1 - default) * viewport` above the
/// bottom edge. When the tree is too short for both, the upper bound wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusBand {
    height: f64,
    default: f64,
}

impl FocusBand {
    /// A band resting at `default`.
    pub const fn new(default: f64) -> Self {
        Self {
            height: default,
            default,
        }
    }

    /// The current focus height.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// The resting focus height.
    pub const fn default_height(&self) -> f64 {
        self.default
    }

    /// Changes the resting focus height without moving the current one.
    pub fn set_default_height(&mut self, default: f64) {
        self.default = default;
    }

    /// Sets the focus height. Call [`FocusBand::clamp`] afterwards.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    /// Returns to the resting focus height.
    pub fn reset(&mut self) {
        self.height = self.default;
    }

    /// Adds `delta` to the focus height and re-clamps.
    pub fn scroll_by(&mut self, delta: f64, total_height: f64, hot_offset: f64, viewport: f64) {
        self.height += delta;
        self.clamp(total_height, hot_offset, viewport);
    }

    /// Top of the tree relative to the top of the viewport, in pixels.
    pub fn tree_top(&self, hot_offset: f64, viewport: f64) -> f64 {
        self.height * viewport - hot_offset
    }

    /// Clamps the focus height so the tree stays inside the band.
    ///
    /// `total_height` is the laid-out height of the whole tree and `hot_offset` the distance
    /// from its top to the hot row.
    pub fn clamp(&mut self, total_height: f64, hot_offset: f64, viewport: f64) {
        if viewport <= 0.0 {
            return;
        }
        let lower = -(total_height - (1.0 - self.default) * viewport);
        if self.tree_top(hot_offset, viewport) < lower {
            self.height = (lower + hot_offset) / viewport;
        }
        let upper = self.default * viewport;
        if self.tree_top(hot_offset, viewport) > upper {
            self.height = (upper + hot_offset) / viewport;
        }
    }
}

impl Default for FocusBand {
    fn default() -> Self {
        Self::new(0.3)
    }
}
