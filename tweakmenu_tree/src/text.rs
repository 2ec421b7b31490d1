// Copyright 2025 the Tweakmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity strings: item titles and filter text live inline, never on the heap.

use core::fmt;

/// Maximum stored length of an item title in bytes, including the ellipsis marker.
#[cfg(not(feature = "compact_titles"))]
pub const MAX_TITLE_LENGTH: usize = 32;

/// Maximum stored length of an item title in bytes, including the ellipsis marker.
#[cfg(feature = "compact_titles")]
pub const MAX_TITLE_LENGTH: usize = 20;

/// Marker appended to titles that did not fit.
pub const ELLIPSIS: &str = "..";

/// A UTF-8 string stored inline in `N` bytes.
///
/// Writes that do not fit are cut at the last character boundary that does.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InlineStr<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> InlineStr<N> {
    /// Number of bytes this string can hold.
    pub const CAPACITY: usize = N;

    /// An empty string.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copies as much of `s` as fits.
    pub fn from_str_truncated(s: &str) -> Self {
        let mut out = Self::new();
        out.push_str(s);
        out
    }

    /// The stored text.
    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the string holds no text.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available.
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Appends as much of `s` as fits and returns `true` if all of it did.
    pub fn push_str(&mut self, s: &str) -> bool {
        let take = floor_char_boundary(s, self.remaining());
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        take == s.len()
    }

    /// Appends a single character if it fits.
    pub fn push(&mut self, c: char) -> bool {
        let mut buf = [0_u8; 4];
        let encoded = c.encode_utf8(&mut buf);
        if encoded.len() > self.remaining() {
            return false;
        }
        self.push_str(encoded)
    }

    /// Removes and returns the last character.
    pub fn pop(&mut self) -> Option<char> {
        let c = self.as_str().chars().next_back()?;
        self.len -= c.len_utf8();
        Some(c)
    }

    /// Empties the string.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> Default for InlineStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for InlineStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for InlineStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Write for InlineStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.push_str(s) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

/// An item title, cut to [`MAX_TITLE_LENGTH`] with an [`ELLIPSIS`] when too long.
///
/// A title that needed cutting keeps its first `MAX_TITLE_LENGTH - 3` bytes followed by
/// the ellipsis, so every stored title is strictly shorter than the maximum.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Title {
    text: InlineStr<MAX_TITLE_LENGTH>,
    truncated: bool,
}

impl Title {
    /// Builds a title from `s`, truncating it when it is `MAX_TITLE_LENGTH` bytes or longer.
    pub fn new(s: &str) -> Self {
        if s.len() < MAX_TITLE_LENGTH {
            return Self {
                text: InlineStr::from_str_truncated(s),
                truncated: false,
            };
        }
        let keep = floor_char_boundary(s, MAX_TITLE_LENGTH - 1 - ELLIPSIS.len());
        let mut text = InlineStr::from_str_truncated(&s[..keep]);
        text.push_str(ELLIPSIS);
        Self {
            text,
            truncated: true,
        }
    }

    /// The stored text, including the ellipsis if the title was cut.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Returns `true` if the original text did not fit.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The part of the original text that survived truncation.
    pub fn kept_prefix(&self) -> &str {
        let s = self.as_str();
        if self.truncated {
            &s[..s.len() - ELLIPSIS.len()]
        } else {
            s
        }
    }

    /// Returns `true` if a path segment names this title.
    ///
    /// Untruncated titles compare exactly. A truncated title matches its stored form, or any
    /// segment long enough to have been truncated that starts with the kept prefix.
    pub fn matches_segment(&self, segment: &str) -> bool {
        if segment == self.as_str() {
            return true;
        }
        self.truncated
            && segment.len() >= MAX_TITLE_LENGTH
            && segment.starts_with(self.kept_prefix())
    }
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest `i <= max` that falls on a character boundary of `s`.
pub(crate) fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut i = max;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity_on_char_boundary() {
        let mut s = InlineStr::<4>::new();
        assert!(s.push_str("ab"));
        // 'é' is two bytes and fits, 'z' does not.
        assert!(!s.push_str("éz"));
        assert_eq!(s.as_str(), "abé");
        assert!(!s.push('x'));
        assert_eq!(s.pop(), Some('é'));
        assert_eq!(s.as_str(), "ab");
    }

    #[test]
    fn short_title_is_stored_verbatim() {
        let t = Title::new("Flag");
        assert_eq!(t.as_str(), "Flag");
        assert!(!t.is_truncated());
        assert!(t.matches_segment("Flag"));
        assert!(!t.matches_segment("Fla"));
        assert!(!t.matches_segment("Flags"));
    }

    #[test]
    fn long_title_gets_ellipsis() {
        let long = "This title is far too long to fit in a slot";
        let t = Title::new(long);
        assert!(t.is_truncated());
        assert!(t.as_str().ends_with(ELLIPSIS));
        assert!(t.as_str().len() < MAX_TITLE_LENGTH);
        assert!(t.matches_segment(long));
        assert!(t.matches_segment(t.as_str()));
        // A short prefix is not enough to name a truncated title.
        assert!(!t.matches_segment(t.kept_prefix()));
    }

    #[test]
    fn truncation_is_deterministic() {
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(Title::new(long), Title::new(long));
    }
}
