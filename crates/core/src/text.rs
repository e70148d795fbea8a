//! Text utilities for display strings.
//!
//! Display strings mix ASCII digits with multi-byte symbols and separators
//! (`€`, no-break spaces), so every offset exchanged with the host counts
//! characters. These helpers convert between character and byte offsets and
//! match separators according to a profile's [`SeparatorMatching`].

use std::borrow::Cow;

use crate::types::{LocaleProfile, SeparatorMatching};

/// Number of characters in `s`.
#[inline]
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the character at `index`, clamped to `s.len()`.
///
/// ```
/// use amount_field_core::text::byte_offset;
///
/// let s = "€1"; // '€' is 3 bytes
/// assert_eq!(byte_offset(s, 0), 0);
/// assert_eq!(byte_offset(s, 1), 3);
/// assert_eq!(byte_offset(s, 2), 4);
/// assert_eq!(byte_offset(s, 9), 4);
/// ```
#[must_use]
pub fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(i, _)| i)
}

/// Character index of the byte offset `byte`.
#[must_use]
pub fn char_index(s: &str, byte: usize) -> usize {
    s.char_indices().take_while(|(i, _)| *i < byte).count()
}

/// Count the ASCII digits at the start of `s`, stopping at anything else.
///
/// ```
/// use amount_field_core::text::count_leading_digits;
///
/// assert_eq!(count_leading_digits("123"), 3);
/// assert_eq!(count_leading_digits("12\u{a0}€"), 2);
/// assert_eq!(count_leading_digits("€"), 0);
/// ```
#[must_use]
pub fn count_leading_digits(s: &str) -> usize {
    s.chars().take_while(char::is_ascii_digit).count()
}

/// A decimal or grouping separator as matched in edited text.
#[derive(Debug, Clone, Copy)]
pub struct Separator<'a> {
    value: &'a str,
    matching: SeparatorMatching,
}

impl<'a> Separator<'a> {
    #[must_use]
    pub const fn new(value: &'a str, matching: SeparatorMatching) -> Self {
        Self { value, matching }
    }

    /// The profile's decimal separator.
    #[must_use]
    pub fn decimal(profile: &'a LocaleProfile) -> Self {
        Self::new(profile.decimal_separator(), profile.separator_matching())
    }

    /// The profile's grouping separator.
    #[must_use]
    pub fn grouping(profile: &'a LocaleProfile) -> Self {
        Self::new(profile.grouping_separator(), profile.separator_matching())
    }

    fn matches_char(&self, c: char) -> bool {
        self.value.contains(c)
    }

    /// Byte ranges of runs of separator characters in `s`. A run is cut
    /// once it is as long as the separator, so `..` is two runs of `.`
    /// while `٫.` is one run of `٫.`.
    fn char_runs(&self, s: &str) -> Vec<(usize, usize)> {
        let limit = char_len(self.value);
        let mut runs = Vec::new();
        let mut current: Option<(usize, usize, usize)> = None;

        for (i, c) in s.char_indices() {
            if !self.matches_char(c) {
                runs.extend(current.take().map(|(start, end, _)| (start, end)));
                continue;
            }
            let next = i + c.len_utf8();
            current = match current {
                Some((start, _, n)) if n < limit => Some((start, next, n + 1)),
                Some((start, end, _)) => {
                    runs.push((start, end));
                    Some((i, next, 1))
                }
                None => Some((i, next, 1)),
            };
        }

        runs.extend(current.map(|(start, end, _)| (start, end)));
        runs
    }

    /// Byte range of the first match in `s`.
    #[must_use]
    pub fn find(&self, s: &str) -> Option<(usize, usize)> {
        if self.value.is_empty() {
            return None;
        }
        match self.matching {
            SeparatorMatching::Token => s.find(self.value).map(|i| (i, i + self.value.len())),
            SeparatorMatching::CharSet => self.char_runs(s).first().copied(),
        }
    }

    #[must_use]
    pub fn is_in(&self, s: &str) -> bool {
        self.find(s).is_some()
    }

    /// Number of non-overlapping matches in `s`.
    #[must_use]
    pub fn count_in(&self, s: &str) -> usize {
        if self.value.is_empty() {
            return 0;
        }
        match self.matching {
            SeparatorMatching::Token => s.matches(self.value).count(),
            SeparatorMatching::CharSet => self.char_runs(s).len(),
        }
    }

    /// `s` with every match removed.
    #[must_use]
    pub fn remove_from<'s>(&self, s: &'s str) -> Cow<'s, str> {
        if !self.is_in(s) {
            return Cow::Borrowed(s);
        }
        match self.matching {
            SeparatorMatching::Token => Cow::Owned(s.replace(self.value, "")),
            SeparatorMatching::CharSet => {
                Cow::Owned(s.chars().filter(|c| !self.matches_char(*c)).collect())
            }
        }
    }

    /// If `s` ends with a match, the number of characters it spans.
    #[must_use]
    pub fn trailing_len(&self, s: &str) -> Option<usize> {
        if self.value.is_empty() {
            return None;
        }
        match self.matching {
            SeparatorMatching::Token => s.ends_with(self.value).then(|| char_len(self.value)),
            SeparatorMatching::CharSet => self
                .char_runs(s)
                .last()
                .filter(|(_, end)| *end == s.len())
                .and_then(|(start, _)| s.get(*start..))
                .map(char_len),
        }
    }
}

/// `text` with the profile's currency symbol removed.
///
/// The full affix (symbol plus spacing) is removed first; when the text no
/// longer contains the full affix, the bare symbol is removed instead.
#[must_use]
pub fn strip_symbol<'s>(text: &'s str, profile: &LocaleProfile) -> Cow<'s, str> {
    let symbol = profile.symbol();
    if symbol.is_empty() {
        return Cow::Borrowed(text);
    }
    if text.contains(symbol) {
        return Cow::Owned(text.replace(symbol, ""));
    }
    let bare = symbol.trim();
    if !bare.is_empty() && text.contains(bare) {
        return Cow::Owned(text.replace(bare, ""));
    }
    Cow::Borrowed(text)
}

/// Length in characters of a trailing pending-fraction run.
///
/// Matches, after removing the symbol, a text ending in a bare decimal
/// separator (`1,234.`) or in a separator followed by digits that end in
/// one or more zeros (`3.0`, `1,234.50`, `0.000`).
///
/// ```
/// use amount_field_core::{BuiltinLocaleProvider, Locale, locale_profile};
/// use amount_field_core::text::trailing_zero_run;
///
/// let provider = BuiltinLocaleProvider::new();
/// let profile = locale_profile(&provider, &Locale::en_us(), None);
///
/// assert_eq!(trailing_zero_run("$1,234.", &profile), Some(1));
/// assert_eq!(trailing_zero_run("$1,234.50", &profile), Some(3));
/// assert_eq!(trailing_zero_run("$1,234.05", &profile), None);
/// assert_eq!(trailing_zero_run("$1,230", &profile), None);
/// ```
#[must_use]
pub fn trailing_zero_run(text: &str, profile: &LocaleProfile) -> Option<usize> {
    let stripped = strip_symbol(text, profile);
    let decimal = Separator::decimal(profile);

    if let Some(len) = decimal.trailing_len(&stripped) {
        return Some(len);
    }

    let digits_start = stripped
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let (head, digits) = stripped.split_at(digits_start);

    if !digits.ends_with('0') {
        return None;
    }

    decimal
        .trailing_len(head)
        .map(|sep_len| sep_len + digits.len())
}

/// The caret position right after the last numeric content.
///
/// With a trailing symbol this is where the symbol starts; otherwise it is
/// the end of the text.
#[must_use]
pub fn end_of_document(text: &str, profile: &LocaleProfile) -> usize {
    if profile.has_suffix_symbol() {
        let symbol = profile.symbol();
        let found = text
            .rfind(symbol)
            .or_else(|| Some(symbol.trim()).filter(|s| !s.is_empty()).and_then(|s| text.rfind(s)));
        if let Some(byte) = found.filter(|b| *b > 0) {
            return char_index(text, byte);
        }
    }
    char_len(text)
}

/// The smallest caret position: right after a leading symbol, else 0.
#[must_use]
pub fn start_of_document(text: &str, profile: &LocaleProfile) -> usize {
    if profile.has_prefix_symbol() {
        let symbol = profile.symbol();
        if let Some(byte) = text.find(symbol) {
            return char_index(text, byte) + char_len(symbol);
        }
    }
    0
}

/// Clamp `caret` into `[start_of_document, end_of_document]`.
#[must_use]
pub fn clamp_caret(text: &str, profile: &LocaleProfile, caret: usize) -> usize {
    let end = end_of_document(text, profile);
    let start = start_of_document(text, profile).min(end);
    caret.clamp(start, end)
}
