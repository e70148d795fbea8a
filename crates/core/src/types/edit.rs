//! Keystroke-level edit types.

use serde::{Deserialize, Serialize};

use crate::text::{byte_offset, char_len};

/// A character range in the display string being replaced by an edit.
///
/// Offsets count Unicode scalar values, not bytes. The range is always
/// normalized so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// First replaced character (inclusive).
    pub start: usize,
    /// End of the replaced characters (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range, normalizing so `start <= end`.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// An empty range at `offset` (a plain insertion point).
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Clamp both ends to a text of `len` characters.
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// One proposed keystroke: replace `range` with `replacement`.
///
/// Never stored: it is validated and then either applied or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit<'a> {
    pub range: TextRange,
    pub replacement: &'a str,
}

impl<'a> PendingEdit<'a> {
    #[must_use]
    pub const fn new(range: TextRange, replacement: &'a str) -> Self {
        Self { range, replacement }
    }

    /// Apply the edit the way a native text buffer would.
    ///
    /// Returns the new text and the caret, which lands right after the
    /// inserted replacement. An out-of-bounds range is clamped.
    ///
    /// ```
    /// use amount_field_core::{PendingEdit, TextRange};
    ///
    /// let (text, caret) = PendingEdit::new(TextRange::caret(4), "0").apply("$999");
    /// assert_eq!((text.as_str(), caret), ("$9990", 5));
    ///
    /// let (text, caret) = PendingEdit::new(TextRange::new(0, 2), "").apply("€12");
    /// assert_eq!((text.as_str(), caret), ("2", 0));
    /// ```
    #[must_use]
    pub fn apply(&self, text: &str) -> (String, usize) {
        let range = self.range.clamp_to(char_len(text));
        let start = byte_offset(text, range.start);
        let end = byte_offset(text, range.end);

        let (head, rest) = text.split_at(start);
        let tail = rest.split_at(end - start).1;

        let mut result = String::with_capacity(text.len() + self.replacement.len());
        result.push_str(head);
        result.push_str(self.replacement);
        result.push_str(tail);

        (result, range.start + char_len(self.replacement))
    }

    /// The characters of `text` outside the replaced range, concatenated.
    #[must_use]
    pub fn surrounding(&self, text: &str) -> String {
        let range = self.range.clamp_to(char_len(text));
        let start = byte_offset(text, range.start);
        let end = byte_offset(text, range.end);
        let (head, rest) = text.split_at(start);
        format!("{head}{}", rest.split_at(end - start).1)
    }
}
