//! Edit interpreter and cursor tracker.
//!
//! [`AmountField`] owns the authoritative amount and the display string
//! derived from it. The host widget drives it with two calls per keystroke:
//!
//! 1. [`AmountField::on_text_will_change`] validates the raw edit against
//!    the current display string. A rejected edit changes nothing.
//! 2. [`AmountField::on_text_did_change`] runs after the host applied an
//!    accepted edit to its buffer. It parses the buffer into a new amount,
//!    renders it again and moves the caret by the change in rendered
//!    length, so a caret after the just-typed digit stays after it when a
//!    grouping separator appears or disappears.
//!
//! [`AmountField::edit`] performs both steps against the field's own
//! display string, which is what tests and headless hosts use.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::formatter::{self, ParseAmountError, render, render_pending, try_parse};
use crate::provider::LocaleProvider;
use crate::text::{
    Separator, char_len, clamp_caret, count_leading_digits, end_of_document, start_of_document,
    strip_symbol, trailing_zero_run,
};
use crate::types::{
    CurrencyCode, FieldState, Locale, LocaleProfile, PendingEdit, SeparatorMatching, TextRange,
};

/// Host-supplied validation that runs after the field's own checks.
///
/// Closures `Fn(TextRange, &str) -> bool` implement this trait.
pub trait EditDelegate {
    /// Return `false` to refuse the edit.
    fn should_change(&self, range: TextRange, replacement: &str) -> bool;
}

impl<F> EditDelegate for F
where
    F: Fn(TextRange, &str) -> bool,
{
    fn should_change(&self, range: TextRange, replacement: &str) -> bool {
        self(range, replacement)
    }
}

/// Why a keystroke was refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The field does not have focus.
    #[error("field is not being edited")]
    NotEditing,
    /// The range reaches into the currency symbol.
    #[error("the currency symbol cannot be edited")]
    InsideSymbol,
    /// The replacement has characters other than digits and the decimal separator.
    #[error("only digits and the decimal separator can be typed")]
    InvalidCharacters,
    /// The amount would contain a second decimal separator.
    #[error("amount already has a decimal separator")]
    DuplicateDecimalSeparator,
    /// The currency has no minor unit.
    #[error("currency does not allow fraction digits")]
    FractionNotAllowed,
    /// More fraction digits than the currency allows.
    #[error("at most {max} fraction digits are allowed")]
    TooManyFractionDigits {
        /// The profile's maximum.
        max: u32,
    },
    /// The resulting amount would not fit in a decimal.
    #[error("amount would be too large")]
    Overflow,
    /// The host delegate refused the edit.
    #[error("refused by delegate")]
    Delegate,
}

/// Check one edit against `text` using only locale rules.
///
/// Checks run in order and the first failure wins:
///
/// 1. The range stays between the symbol and the numeric content's end
/// 2. The replacement holds only digits and decimal separators
/// 3. The amount keeps at most one decimal separator
/// 4. The fraction fits the profile's maximum fraction digits
/// 5. The resulting amount fits in a decimal
///
/// # Errors
///
/// Returns the [`Rejection`] of the first failing check.
pub fn validate_edit(
    text: &str,
    edit: &PendingEdit<'_>,
    profile: &LocaleProfile,
) -> Result<(), Rejection> {
    let range = edit.range.clamp_to(char_len(text));
    if range.start < start_of_document(text, profile) || range.end > end_of_document(text, profile)
    {
        return Err(Rejection::InsideSymbol);
    }

    let decimal = Separator::decimal(profile);

    let residue = decimal.remove_from(edit.replacement);
    if residue.chars().any(|c| !c.is_ascii_digit()) {
        return Err(Rejection::InvalidCharacters);
    }

    match decimal.count_in(edit.replacement) {
        0 => {}
        1 if !decimal.is_in(&strip_symbol(&edit.surrounding(text), profile)) => {}
        _ => return Err(Rejection::DuplicateDecimalSeparator),
    }

    let (result, _) = edit.apply(text);
    let stripped = strip_symbol(&result, profile);
    if let Some((_, end)) = decimal.find(&stripped) {
        let max = profile.max_fraction_digits();
        if max == 0 {
            return Err(Rejection::FractionNotAllowed);
        }
        if fraction_digits(stripped.split_at(end).1, profile) > max as usize {
            return Err(Rejection::TooManyFractionDigits { max });
        }
    }

    if matches!(
        try_parse(&result, profile),
        Err(ParseAmountError::Overflow | ParseAmountError::TooManyFractionDigits { .. })
    ) {
        return Err(Rejection::Overflow);
    }

    Ok(())
}

/// The outcome of one reformat pass: what the host must now show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reformat {
    pub amount: Decimal,
    pub display: String,
    pub caret: usize,
}

/// Result of [`AmountField::edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EditOutcome {
    /// The edit passed validation and the field was reformatted.
    Committed(Reformat),
    /// The edit was refused; nothing changed.
    Rejected {
        /// Why.
        reason: Rejection,
    },
}

impl EditOutcome {
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    #[must_use]
    pub const fn reformat(&self) -> Option<&Reformat> {
        match self {
            Self::Committed(reformat) => Some(reformat),
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Committed(_) => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }
}

/// A currency amount input's editing state.
///
/// The display string is derived from the amount and has no setter: the
/// only ways to change it are [`set_amount`](Self::set_amount), a locale or
/// currency change, and interpreted edits.
///
/// The caret can only sit at the end of the numeric content. Explicit
/// placement collapses there; the reformat pass is the one place it is
/// moved by an offset, to follow the digit just typed.
///
/// ```
/// use amount_field_core::{AmountField, BuiltinLocaleProvider, Locale, TextRange};
///
/// let mut field = AmountField::new(BuiltinLocaleProvider::new(), Locale::en_us(), None);
/// assert_eq!(field.display(), "$0");
///
/// field.begin_editing();
/// field.edit(TextRange::caret(2), "999");
/// assert_eq!(field.display(), "$999");
///
/// field.edit(TextRange::caret(4), "9");
/// assert_eq!(field.display(), "$9,999");
/// assert_eq!(field.caret(), 6);
/// ```
pub struct AmountField {
    provider: Box<dyn LocaleProvider>,
    locale: Locale,
    currency_code: Option<CurrencyCode>,
    separator_matching: SeparatorMatching,
    profile: LocaleProfile,
    amount: Decimal,
    display: String,
    caret: usize,
    state: FieldState,
    delegate: Option<Box<dyn EditDelegate>>,
}

impl fmt::Debug for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountField")
            .field("profile", &self.profile)
            .field("amount", &self.amount)
            .field("display", &self.display)
            .field("caret", &self.caret)
            .field("state", &self.state)
            .field("delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

impl AmountField {
    /// Create an idle field showing zero.
    pub fn new(
        provider: impl LocaleProvider + 'static,
        locale: Locale,
        currency_code: Option<CurrencyCode>,
    ) -> Self {
        let profile = formatter::locale_profile(&provider, &locale, currency_code);
        let display = render(Decimal::ZERO, &profile);
        let caret = end_of_document(&display, &profile);

        Self {
            provider: Box::new(provider),
            locale,
            currency_code,
            separator_matching: SeparatorMatching::default(),
            profile,
            amount: Decimal::ZERO,
            display,
            caret,
            state: FieldState::Idle,
            delegate: None,
        }
    }

    /// Start from `amount` instead of zero.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self.rerender();
        self
    }

    /// Use `matching` for separators and the symbol.
    #[must_use]
    pub fn with_separator_matching(mut self, matching: SeparatorMatching) -> Self {
        self.separator_matching = matching;
        self.refresh_profile();
        self
    }

    /// Register host validation, replacing any previous delegate.
    pub fn set_delegate(&mut self, delegate: impl EditDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The text the host must show.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    #[must_use]
    pub const fn state(&self) -> FieldState {
        self.state
    }

    #[must_use]
    pub const fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub const fn currency_code(&self) -> Option<CurrencyCode> {
        self.currency_code
    }

    /// Replace the amount from outside the field.
    ///
    /// Bypasses validation, re-renders, puts the caret at the end and drops
    /// the field out of editing.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.rerender();
        self.transition(FieldState::Idle);
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.refresh_profile();
    }

    pub fn set_currency_code(&mut self, currency_code: Option<CurrencyCode>) {
        self.currency_code = currency_code;
        self.refresh_profile();
    }

    /// Focus gained: the caret jumps to the end.
    pub fn begin_editing(&mut self) {
        self.transition(FieldState::Editing);
        self.caret = self.end_of_document();
    }

    /// Focus lost: any pending fraction suffix (`1,234.`) is rendered away.
    pub fn end_editing(&mut self) {
        self.transition(FieldState::Idle);
        self.rerender();
    }

    /// Request a caret position. Every request lands at the end of the
    /// numeric content; returns where the caret is.
    pub fn set_caret(&mut self, requested: usize) -> usize {
        self.caret = self.end_of_document();
        if requested != self.caret {
            tracing::trace!(requested, caret = self.caret, "Caret placement collapsed to end");
        }
        self.caret
    }

    /// Whether the host should draw a caret at `position`.
    #[must_use]
    pub fn is_caret_visible_at(&self, position: usize) -> bool {
        position == self.end_of_document()
    }

    /// Position right after the last numeric content.
    #[must_use]
    pub fn end_of_document(&self) -> usize {
        end_of_document(&self.display, &self.profile)
    }

    /// Position right after a leading symbol, or 0.
    #[must_use]
    pub fn start_of_document(&self) -> usize {
        start_of_document(&self.display, &self.profile)
    }

    /// Validate an edit against the current display string.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] of the first failing check. The host
    /// delegate is consulted last.
    pub fn check_edit(&self, range: TextRange, replacement: &str) -> Result<(), Rejection> {
        if !self.state.is_editing() {
            return Err(Rejection::NotEditing);
        }

        validate_edit(
            &self.display,
            &PendingEdit::new(range, replacement),
            &self.profile,
        )?;

        match &self.delegate {
            Some(delegate) if !delegate.should_change(range, replacement) => {
                Err(Rejection::Delegate)
            }
            _ => Ok(()),
        }
    }

    /// Host hook: may the pending edit go into the text buffer?
    #[must_use]
    pub fn on_text_will_change(&self, range: TextRange, replacement: &str) -> bool {
        match self.check_edit(range, replacement) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(
                    %reason,
                    start = range.start,
                    end = range.end,
                    replacement,
                    "Edit rejected"
                );
                false
            }
        }
    }

    /// Host hook: the buffer now holds `text` with the caret at `caret`.
    ///
    /// Parses the buffer, re-renders the amount and places the caret. When
    /// the caret was at the end, it moves by the change in rendered length,
    /// ignoring a trailing pending fraction (`.`, `.0`, `.50`) on both
    /// sides; otherwise it goes to the end.
    pub fn on_text_did_change(&mut self, text: &str, caret: usize) -> Reformat {
        let profile = &self.profile;
        let zero_run = trailing_zero_run(text, profile);
        let previous_len = char_len(text).saturating_sub(zero_run.unwrap_or(0));
        let caret = caret.min(char_len(text));
        let at_end = caret == end_of_document(text, profile);

        let amount = formatter::round_to_profile(formatter::parse(text, profile), profile);
        let pending = zero_run
            .filter(|_| at_end)
            .map(|_| typed_fraction_digits(text, profile));
        let display = match pending {
            Some(digits) => render_pending(amount, profile, digits),
            None => render(amount, profile),
        };

        let caret = if at_end {
            // The caret moves with the numeric part and stays after the
            // pending suffix, which may render longer than it was typed.
            let old_suffix = pending.and(zero_run).unwrap_or(0);
            let new_suffix = pending
                .and_then(|_| trailing_zero_run(&display, profile))
                .unwrap_or(0);
            let shown = char_len(&display).saturating_sub(new_suffix);
            let glued = (caret.saturating_sub(old_suffix) + shown).saturating_sub(previous_len);
            clamp_caret(&display, profile, glued + new_suffix)
        } else {
            end_of_document(&display, profile)
        };

        // `tracing` imports a `display` helper inside its macros, shadowing the local.
        let rendered = &display;
        tracing::debug!(%amount, display = %rendered, caret, pending = ?pending, "Reformatted");

        self.amount = amount;
        self.display.clone_from(&display);
        self.caret = caret;

        Reformat {
            amount,
            display,
            caret,
        }
    }

    /// Validate `replacement` over `range`, apply it like a native text
    /// buffer would, then run the reformat pass.
    pub fn edit(&mut self, range: TextRange, replacement: &str) -> EditOutcome {
        if let Err(reason) = self.check_edit(range, replacement) {
            tracing::debug!(%reason, replacement, "Edit rejected");
            return EditOutcome::Rejected { reason };
        }

        let (text, caret) = PendingEdit::new(range, replacement).apply(&self.display);
        EditOutcome::Committed(self.on_text_did_change(&text, caret))
    }

    /// Type `replacement` at the caret.
    pub fn type_text(&mut self, replacement: &str) -> EditOutcome {
        self.edit(TextRange::caret(self.caret), replacement)
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) -> EditOutcome {
        let start = self.caret.saturating_sub(1);
        self.edit(TextRange::new(start, self.caret), "")
    }

    fn refresh_profile(&mut self) {
        self.profile = formatter::locale_profile(
            self.provider.as_ref(),
            &self.locale,
            self.currency_code,
        )
        .with_separator_matching(self.separator_matching);
        tracing::debug!(profile = ?self.profile, "Locale profile updated");
        self.rerender();
    }

    fn rerender(&mut self) {
        self.display = render(self.amount, &self.profile);
        self.caret = self.end_of_document();
    }

    fn transition(&mut self, next: FieldState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "Field state changed");
            self.state = next;
        }
    }
}

/// Digits at the start of `after_separator`, skipping grouping separators.
fn fraction_digits(after_separator: &str, profile: &LocaleProfile) -> usize {
    count_leading_digits(&Separator::grouping(profile).remove_from(after_separator))
}

/// Fraction digits typed after the decimal separator in `text`.
fn typed_fraction_digits(text: &str, profile: &LocaleProfile) -> u32 {
    let stripped = strip_symbol(text, profile);
    Separator::decimal(profile)
        .find(&stripped)
        .map_or(0, |(_, end)| {
            u32::try_from(fraction_digits(stripped.split_at(end).1, profile)).unwrap_or(u32::MAX)
        })
}
