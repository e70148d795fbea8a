//! Formatter: amount ⇄ display string for a locale profile.
//!
//! - [`locale_profile`] asks a [`LocaleProvider`] for the facts of a
//!   (locale, currency) pair and never fails
//! - [`render`] is deterministic: the same amount and profile always give
//!   the same string
//! - [`parse`] never fails either; [`try_parse`] reports why a string is
//!   not an amount

use rust_decimal::{Decimal, RoundingStrategy};

use crate::provider::LocaleProvider;
use crate::text::{Separator, strip_symbol};
use crate::types::{CurrencyCode, Locale, LocaleFacts, LocaleProfile, SymbolPlacement};

/// Why a string could not be read as an amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// A character that is not a digit, separator, sign or symbol.
    #[error("unexpected character {0:?} in amount")]
    InvalidCharacter(char),
    /// More than one decimal separator.
    #[error("amount contains more than one decimal separator")]
    MultipleDecimalSeparators,
    /// More fraction digits than a decimal can hold.
    #[error("amount has {digits} fraction digits, at most {max} are supported")]
    TooManyFractionDigits {
        /// Fraction digits found.
        digits: usize,
        /// Largest supported scale.
        max: u32,
    },
    /// The value does not fit in a 96-bit decimal mantissa.
    #[error("amount is too large")]
    Overflow,
}

/// Resolve the formatting facts for `locale` and `currency`.
///
/// A missing currency means the locale's own currency. A currency the
/// provider does not know is replaced by the locale's own currency. Facts
/// that break a [`LocaleProfile`] invariant are repaired with
/// [`LocaleProfile::best_effort`].
pub fn locale_profile<P: LocaleProvider + ?Sized>(
    provider: &P,
    locale: &Locale,
    currency: Option<CurrencyCode>,
) -> LocaleProfile {
    let currency = match currency {
        Some(code) if provider.is_known_currency(code) => Some(code),
        Some(code) => {
            let fallback = provider.default_currency(locale);
            tracing::warn!(
                currency = %code,
                %locale,
                fallback = ?fallback.map(|c| c.to_string()),
                "Unrecognized currency code, using the locale's currency"
            );
            fallback
        }
        None => provider.default_currency(locale),
    };

    let facts = LocaleFacts {
        symbol: provider.currency_symbol(locale, currency),
        placement: provider.symbol_placement(locale, currency),
        grouping_separator: provider.grouping_separator(locale, currency),
        decimal_separator: provider.decimal_separator(locale, currency),
        max_fraction_digits: provider.max_fraction_digits(locale, currency),
    };

    match LocaleProfile::new(locale.clone(), currency, facts.clone()) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, %locale, "Misconfigured locale, using default separators");
            LocaleProfile::best_effort(locale.clone(), currency, facts)
        }
    }
}

/// Render `amount` as a currency string.
///
/// The value is rounded to the profile's maximum fraction digits (midpoint
/// to even) and trailing fraction zeros are dropped, so whole amounts carry
/// no decimal separator at all.
///
/// ```
/// use amount_field_core::{BuiltinLocaleProvider, Decimal, Locale, locale_profile, render};
///
/// let provider = BuiltinLocaleProvider::new();
/// let profile = locale_profile(&provider, &Locale::en_us(), None);
///
/// assert_eq!(render(Decimal::ZERO, &profile), "$0");
/// assert_eq!(render(Decimal::new(123_450, 2), &profile), "$1,234.5");
/// assert_eq!(render(Decimal::new(-5, 0), &profile), "-$5");
/// ```
#[must_use]
pub fn render(amount: Decimal, profile: &LocaleProfile) -> String {
    render_with_fraction(amount, profile, None)
}

/// Render `amount` while the user is still typing its fraction.
///
/// Keeps the decimal separator and at least `typed_digits` fraction digits
/// (capped at the profile maximum), so `1234.` and `1234.50` survive the
/// reformat pass.
#[must_use]
pub fn render_pending(amount: Decimal, profile: &LocaleProfile, typed_digits: u32) -> String {
    if profile.max_fraction_digits() == 0 {
        return render(amount, profile);
    }
    render_with_fraction(amount, profile, Some(typed_digits))
}

/// Round `amount` to the profile's maximum fraction digits, ties to even.
#[must_use]
pub fn round_to_profile(amount: Decimal, profile: &LocaleProfile) -> Decimal {
    amount.round_dp_with_strategy(
        profile.max_fraction_digits(),
        RoundingStrategy::MidpointNearestEven,
    )
}

fn render_with_fraction(amount: Decimal, profile: &LocaleProfile, pending: Option<u32>) -> String {
    let max = profile.max_fraction_digits();
    let mut value = round_to_profile(amount, profile).normalize();

    if let Some(min) = pending.map(|d| d.min(max)) {
        if value.scale() < min {
            value.rescale(min);
        }
    }

    let negative = value.is_sign_negative() && !value.is_zero();
    let digits = value.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((&digits, ""));

    let mut number = group_digits(integer, profile.grouping_separator());
    if !fraction.is_empty() || pending.is_some() {
        number.push_str(profile.decimal_separator());
        number.push_str(fraction);
    }

    let sign = if negative { "-" } else { "" };
    let symbol = profile.symbol();
    match profile.placement() {
        SymbolPlacement::Prefix => format!("{sign}{symbol}{number}"),
        SymbolPlacement::Suffix => format!("{sign}{number}{symbol}"),
    }
}

/// Insert `separator` between every group of three integer digits.
fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + separator.len() * (len / 3));
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Read `text` as an amount, normalizing anything unreadable to zero.
///
/// ```
/// use amount_field_core::{BuiltinLocaleProvider, Decimal, Locale, locale_profile, parse};
///
/// let provider = BuiltinLocaleProvider::new();
/// let profile = locale_profile(&provider, &Locale::en_us(), None);
///
/// assert_eq!(parse("$1,234.5", &profile), Decimal::new(12345, 1));
/// assert_eq!(parse("", &profile), Decimal::ZERO);
/// assert_eq!(parse("1.2.3", &profile), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse(text: &str, profile: &LocaleProfile) -> Decimal {
    try_parse(text, profile).unwrap_or_else(|e| {
        tracing::debug!(error = %e, text, "Unparseable amount, using zero");
        Decimal::ZERO
    })
}

/// Read `text` as an amount.
///
/// Removes the currency symbol and every grouping separator, accepts one
/// leading `-`, then reads digits around at most one decimal separator.
/// Text with no digits at all (`""`, `"$"`, `"."`) is zero.
///
/// # Errors
///
/// Returns a [`ParseAmountError`] for stray characters, repeated decimal
/// separators, or values a `Decimal` cannot hold.
pub fn try_parse(text: &str, profile: &LocaleProfile) -> Result<Decimal, ParseAmountError> {
    let stripped = strip_symbol(text, profile);
    let ungrouped = Separator::grouping(profile).remove_from(&stripped);
    let trimmed = ungrouped.trim();
    let (negative, body) = trimmed
        .strip_prefix('-')
        .map_or((false, trimmed), |rest| (true, rest));

    let decimal = Separator::decimal(profile);
    let (integer, fraction) = decimal.find(body).map_or((body, ""), |(start, end)| {
        let (integer, rest) = body.split_at(start);
        (integer, rest.split_at(end - start).1)
    });

    if decimal.is_in(fraction) {
        return Err(ParseAmountError::MultipleDecimalSeparators);
    }

    if let Some(c) = integer
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidCharacter(c));
    }

    let scale = u32::try_from(fraction.len())
        .ok()
        .filter(|s| *s <= LocaleProfile::MAX_FRACTION_DIGITS)
        .ok_or(ParseAmountError::TooManyFractionDigits {
            digits: fraction.len(),
            max: LocaleProfile::MAX_FRACTION_DIGITS,
        })?;

    let mantissa = integer
        .bytes()
        .chain(fraction.bytes())
        .try_fold(0_i128, |acc, b| {
            acc.checked_mul(10)?.checked_add(i128::from(b - b'0'))
        })
        .ok_or(ParseAmountError::Overflow)?;
    let mantissa = if negative { -mantissa } else { mantissa };

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| ParseAmountError::Overflow)
}
