// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing capability a host provides.

use kurbo::{Point, Size};

use crate::config::{Color, Font};

/// Drawing primitives supplied by the host.
///
/// The menu computes geometry only and issues every draw call through this trait. Positions
/// are the top-left corner of the text or rectangle in screen pixels, `y` growing downwards.
pub trait Drawer {
    /// Draws a single line of text.
    fn draw_text(&mut self, text: &str, position: Point, color: Color, font: &Font);

    /// Fills an axis-aligned rectangle.
    fn draw_rect(&mut self, position: Point, size: Size, color: Color);

    /// Measures a single line of text.
    fn measure_text(&self, text: &str, font: &Font) -> Size;

    /// Splits off the first line of `text` that fits in `max_width`.
    ///
    /// Returns the line and the remaining text. The default breaks greedily at spaces, honors
    /// `'\n'`, and splits inside a word only when the word alone is too wide. A non-empty `text`
    /// always yields a non-empty line.
    fn wrap_line<'t>(&self, text: &'t str, font: &Font, max_width: f64) -> (&'t str, &'t str) {
        let line_end = text.find('\n').unwrap_or(text.len());
        let line = &text[..line_end];

        let mut fit = 0;
        let mut scan = 0;
        while scan < line.len() {
            let word_end = line[scan..].find(' ').map_or(line.len(), |i| scan + i);
            if self.measure_text(&line[..word_end], font).width > max_width {
                break;
            }
            fit = word_end;
            scan = word_end + 1;
        }

        if fit == 0 && !line.is_empty() {
            // The first word alone is too wide: take as many characters as fit, at least one.
            for (i, c) in line.char_indices() {
                let next = i + c.len_utf8();
                if fit > 0 && self.measure_text(&line[..next], font).width > max_width {
                    break;
                }
                fit = next;
            }
        }

        if fit >= line.len() {
            let rest = text.get(line_end + 1..).unwrap_or("");
            return (line, rest);
        }
        let rest = text[fit..].trim_start_matches(' ');
        (&line[..fit], rest.strip_prefix('\n').unwrap_or(rest))
    }
}

/// Iterator over the wrapped lines of a text.
pub struct WrappedLines<'d, 't, D: ?Sized> {
    drawer: &'d D,
    rest: &'t str,
    font: Font,
    max_width: f64,
}

impl<D: ?Sized> core::fmt::Debug for WrappedLines<'_, '_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WrappedLines")
            .field("rest", &self.rest)
            .field("font", &self.font)
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}

impl<'d, 't, D: Drawer + ?Sized> WrappedLines<'d, 't, D> {
    /// Wraps `text` to `max_width` using the drawer's [`Drawer::wrap_line`].
    pub fn new(drawer: &'d D, text: &'t str, font: Font, max_width: f64) -> Self {
        Self {
            drawer,
            rest: text,
            font,
            max_width,
        }
    }
}

impl<'t, D: Drawer + ?Sized> Iterator for WrappedLines<'_, 't, D> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = self.drawer.wrap_line(self.rest, &self.font, self.max_width);
        if rest.len() >= self.rest.len() {
            // A drawer that makes no progress would loop forever; emit the rest as one line.
            let all = self.rest;
            self.rest = "";
            return Some(all);
        }
        self.rest = rest;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Every character is 10 pixels wide.
    struct Monospace;

    impl Drawer for Monospace {
        fn draw_text(&mut self, _: &str, _: Point, _: Color, _: &Font) {}

        fn draw_rect(&mut self, _: Point, _: Size, _: Color) {}

        fn measure_text(&self, text: &str, _: &Font) -> Size {
            #[allow(clippy::cast_precision_loss, reason = "Test strings are short.")]
            let width = text.chars().count() as f64 * 10.0;
            Size::new(width, 16.0)
        }
    }

    fn wrap(text: &str, max_width: f64) -> Vec<&str> {
        WrappedLines::new(&Monospace, text, Font::default(), max_width).collect()
    }

    #[test]
    fn greedy_breaks_at_spaces() {
        assert_eq!(
            wrap("the quick brown fox", 100.0),
            ["the quick", "brown fox"]
        );
        assert_eq!(wrap("short", 100.0), ["short"]);
        assert!(wrap("", 100.0).is_empty());
    }

    #[test]
    fn newlines_force_breaks() {
        assert_eq!(wrap("one\ntwo three", 200.0), ["one", "two three"]);
    }

    #[test]
    fn overlong_words_are_split() {
        assert_eq!(wrap("abcdefgh ij", 30.0), ["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn too_narrow_still_makes_progress() {
        assert_eq!(wrap("ab", 0.0), ["a", "b"]);
    }
}
