// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu geometry, colors, and fonts.

use kurbo::{Point, Size};

/// An RGBA color with 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Color {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

/// A font as the host's drawer understands it.
///
/// The menu never interprets `handle`; it only passes fonts through to the [`Drawer`].
///
/// [`Drawer`]: crate::Drawer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Font {
    /// Host-defined font handle.
    pub handle: u64,
    /// Nominal size in pixels.
    pub size: f64,
    /// Bold variant.
    pub bold: bool,
    /// Italic variant.
    pub italic: bool,
}

impl Font {
    /// A regular font of `size` pixels.
    pub const fn new(handle: u64, size: f64) -> Self {
        Self {
            handle,
            size,
            bold: false,
            italic: false,
        }
    }
}

/// Fonts used for each kind of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fonts {
    /// Folder titles.
    pub folder: Font,
    /// Leaf titles.
    pub item: Font,
    /// Value preview and expanded value list.
    pub value: Font,
    /// Leaf descriptions.
    pub description: Font,
    /// Filter bar.
    pub filter: Font,
}

impl Default for Fonts {
    fn default() -> Self {
        let regular = Font::new(0, 16.0);
        Self {
            folder: Font {
                bold: true,
                ..regular
            },
            item: regular,
            value: regular,
            description: Font {
                italic: true,
                ..regular
            },
            filter: regular,
        }
    }
}

/// Colors used by the render walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Menu panel.
    pub background: Color,
    /// Highlight behind the hot row.
    pub hot_background: Color,
    /// Folder titles.
    pub folder_title: Color,
    /// Leaf titles.
    pub item_title: Color,
    /// Leaf title when the leaf's own title matches the filter.
    pub item_title_match: Color,
    /// Values that are neither hot nor committed.
    pub value: Color,
    /// Committed value equal to the leaf's default.
    pub value_default: Color,
    /// Committed value differing from the leaf's default.
    pub value_overridden: Color,
    /// Leaf descriptions.
    pub description: Color,
    /// Filter bar text.
    pub filter: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgba(25, 50, 25, 220),
            hot_background: Color::rgba(100, 150, 100, 200),
            folder_title: Color::rgb(255, 255, 255),
            item_title: Color::rgb(120, 220, 160),
            item_title_match: Color::rgb(255, 220, 120),
            value: Color::rgb(150, 150, 150),
            value_default: Color::rgb(100, 200, 255),
            value_overridden: Color::rgb(255, 150, 100),
            description: Color::rgb(180, 180, 180),
            filter: Color::WHITE,
        }
    }
}

/// Menu configuration.
///
/// All lengths are in pixels, with `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuConfig {
    /// Top-left corner of the fully open panel on screen.
    pub top_left: Point,
    /// Panel size; its height is the scroll viewport.
    pub size: Size,
    /// Size of the host screen.
    pub screen_size: Size,
    /// Height of one row.
    pub item_height: f64,
    /// Horizontal indent per tree level.
    pub indent: f64,
    /// Left padding inside the panel.
    pub padding: f64,
    /// Where the hot row rests, as a fraction of the viewport height.
    pub focus_height: f64,
    /// Openness progress per second while animating.
    pub open_speed: f64,
    /// Start of the value preview column, as a fraction of the panel width.
    pub value_column: f64,
    /// Show the filter bar from the start.
    pub filter_enabled_at_start: bool,
    /// Colors.
    pub theme: Theme,
    /// Fonts.
    pub fonts: Fonts,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            top_left: Point::ZERO,
            size: Size::new(500.0, 720.0),
            screen_size: Size::new(1280.0, 720.0),
            item_height: 30.0,
            indent: 20.0,
            padding: 10.0,
            focus_height: 0.3,
            open_speed: 4.0,
            value_column: 0.6,
            filter_enabled_at_start: false,
            theme: Theme::default(),
            fonts: Fonts::default(),
        }
    }
}
