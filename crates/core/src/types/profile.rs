//! Locale profile: the formatting facts for one (locale, currency) pair.

use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Locale};

/// Errors that make a set of locale facts unusable for editing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The decimal separator is empty.
    #[error("decimal separator cannot be empty")]
    EmptyDecimalSeparator,
    /// Decimal and grouping separators share a character.
    #[error("decimal separator {decimal:?} overlaps grouping separator {grouping:?}")]
    SeparatorsCollide {
        /// Decimal separator.
        decimal: String,
        /// Grouping separator.
        grouping: String,
    },
    /// A separator or the symbol contains a digit.
    #[error("{field} {value:?} must not contain digits")]
    DigitInAffix {
        /// Which fact is invalid.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// More fraction digits than a decimal can hold.
    #[error("maximum fraction digits must be at most {max}, got {value}")]
    FractionDigitsOutOfRange {
        /// Largest supported value.
        max: u32,
        /// Requested value.
        value: u32,
    },
}

/// Where the currency symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPlacement {
    #[default]
    Prefix,
    Suffix,
}

/// How separator strings are matched inside edited text.
///
/// Separators longer than one character (and symbols like `R$`) can be
/// matched as whole strings or as sets of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorMatching {
    /// A separator only matches as the complete string.
    #[default]
    Token,
    /// Any run of the separator's characters matches, up to the
    /// separator's length, so `٫.` also accepts a bare `.`.
    CharSet,
}

impl std::fmt::Display for SeparatorMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::CharSet => write!(f, "char-set"),
        }
    }
}

impl std::str::FromStr for SeparatorMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(Self::Token),
            "char-set" | "charset" => Ok(Self::CharSet),
            _ => Err(format!("invalid separator matching: {s}")),
        }
    }
}

/// Raw facts reported by a locale provider before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFacts {
    /// Currency affix exactly as it appears next to a number, spacing included.
    pub symbol: String,
    pub placement: SymbolPlacement,
    pub grouping_separator: String,
    pub decimal_separator: String,
    pub max_fraction_digits: u32,
}

impl Default for LocaleFacts {
    fn default() -> Self {
        Self {
            symbol: "$".to_owned(),
            placement: SymbolPlacement::Prefix,
            grouping_separator: ",".to_owned(),
            decimal_separator: ".".to_owned(),
            max_fraction_digits: 2,
        }
    }
}

/// Validated, immutable formatting facts for a locale and currency.
///
/// ## Invariants
///
/// - The decimal separator is non-empty
/// - Decimal and grouping separators share no character
/// - No separator and no symbol contains an ASCII digit
/// - `max_fraction_digits` fits a `rust_decimal::Decimal` scale
///
/// ```
/// use amount_field_core::{Locale, LocaleFacts, LocaleProfile};
///
/// let profile = LocaleProfile::new(Locale::en_us(), None, LocaleFacts::default()).unwrap();
/// assert_eq!(profile.decimal_separator(), ".");
///
/// let broken = LocaleFacts {
///     grouping_separator: ".".to_owned(),
///     ..LocaleFacts::default()
/// };
/// assert!(LocaleProfile::new(Locale::en_us(), None, broken).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleProfile {
    locale: Locale,
    currency_code: Option<CurrencyCode>,
    symbol: String,
    placement: SymbolPlacement,
    grouping_separator: String,
    decimal_separator: String,
    max_fraction_digits: u32,
    #[serde(default)]
    separator_matching: SeparatorMatching,
}

impl LocaleProfile {
    /// Largest scale a `rust_decimal::Decimal` supports.
    pub const MAX_FRACTION_DIGITS: u32 = 28;

    /// Validate `facts` and build a profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if any invariant listed on the type fails.
    pub fn new(
        locale: Locale,
        currency_code: Option<CurrencyCode>,
        facts: LocaleFacts,
    ) -> Result<Self, ProfileError> {
        if facts.decimal_separator.is_empty() {
            return Err(ProfileError::EmptyDecimalSeparator);
        }

        for (field, value) in [
            ("decimal separator", &facts.decimal_separator),
            ("grouping separator", &facts.grouping_separator),
            ("currency symbol", &facts.symbol),
        ] {
            if value.chars().any(|c| c.is_ascii_digit()) {
                return Err(ProfileError::DigitInAffix {
                    field,
                    value: value.clone(),
                });
            }
        }

        if facts
            .decimal_separator
            .chars()
            .any(|c| facts.grouping_separator.contains(c))
        {
            return Err(ProfileError::SeparatorsCollide {
                decimal: facts.decimal_separator,
                grouping: facts.grouping_separator,
            });
        }

        if facts.max_fraction_digits > Self::MAX_FRACTION_DIGITS {
            return Err(ProfileError::FractionDigitsOutOfRange {
                max: Self::MAX_FRACTION_DIGITS,
                value: facts.max_fraction_digits,
            });
        }

        Ok(Self::from_facts_unchecked(locale, currency_code, facts))
    }

    /// Build a profile that keeps whatever in `facts` is usable and replaces
    /// the rest with en-style defaults. Never fails.
    #[must_use]
    pub fn best_effort(
        locale: Locale,
        currency_code: Option<CurrencyCode>,
        facts: LocaleFacts,
    ) -> Self {
        let defaults = LocaleFacts::default();
        let symbol = if facts.symbol.chars().any(|c| c.is_ascii_digit()) {
            currency_code.map(|c| c.to_string()).unwrap_or_default()
        } else {
            facts.symbol
        };

        Self::from_facts_unchecked(
            locale,
            currency_code,
            LocaleFacts {
                symbol,
                placement: facts.placement,
                grouping_separator: defaults.grouping_separator,
                decimal_separator: defaults.decimal_separator,
                max_fraction_digits: facts.max_fraction_digits.min(Self::MAX_FRACTION_DIGITS),
            },
        )
    }

    fn from_facts_unchecked(
        locale: Locale,
        currency_code: Option<CurrencyCode>,
        facts: LocaleFacts,
    ) -> Self {
        Self {
            locale,
            currency_code,
            symbol: facts.symbol,
            placement: facts.placement,
            grouping_separator: facts.grouping_separator,
            decimal_separator: facts.decimal_separator,
            max_fraction_digits: facts.max_fraction_digits,
            separator_matching: SeparatorMatching::default(),
        }
    }

    /// Returns a copy of this profile using the given separator matching.
    #[must_use]
    pub fn with_separator_matching(mut self, matching: SeparatorMatching) -> Self {
        self.separator_matching = matching;
        self
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub const fn currency_code(&self) -> Option<CurrencyCode> {
        self.currency_code
    }

    /// The currency affix, spacing included. May be empty.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn placement(&self) -> SymbolPlacement {
        self.placement
    }

    #[must_use]
    pub fn grouping_separator(&self) -> &str {
        &self.grouping_separator
    }

    #[must_use]
    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    #[must_use]
    pub const fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    #[must_use]
    pub const fn separator_matching(&self) -> SeparatorMatching {
        self.separator_matching
    }

    /// Returns true when a non-empty symbol precedes the number.
    #[must_use]
    pub fn has_prefix_symbol(&self) -> bool {
        !self.symbol.is_empty() && self.placement == SymbolPlacement::Prefix
    }

    /// Returns true when a non-empty symbol follows the number.
    #[must_use]
    pub fn has_suffix_symbol(&self) -> bool {
        !self.symbol.is_empty() && self.placement == SymbolPlacement::Suffix
    }
}
