//! Locale provider: where symbols, separators and fraction digits come from.
//!
//! The editor never hard-codes locale facts. It asks a [`LocaleProvider`],
//! which a host can back with ICU, the platform's number formatter, or the
//! tables in [`BuiltinLocaleProvider`].

use rust_decimal::Decimal;

use crate::formatter;
use crate::types::{CurrencyCode, Locale, SymbolPlacement};

/// Source of locale and currency formatting facts.
///
/// Every method takes the effective currency; `None` means the locale's
/// own currency.
pub trait LocaleProvider {
    /// Currency affix as it appears next to a number, spacing included
    /// (`"$"`, `"\u{a0}€"`, `"R$\u{a0}"`).
    fn currency_symbol(&self, locale: &Locale, currency: Option<CurrencyCode>) -> String;

    fn symbol_placement(&self, locale: &Locale, currency: Option<CurrencyCode>)
    -> SymbolPlacement;

    fn grouping_separator(&self, locale: &Locale, currency: Option<CurrencyCode>) -> String;

    fn decimal_separator(&self, locale: &Locale, currency: Option<CurrencyCode>) -> String;

    fn max_fraction_digits(&self, locale: &Locale, currency: Option<CurrencyCode>) -> u32;

    /// The currency used when none is given.
    fn default_currency(&self, _locale: &Locale) -> Option<CurrencyCode> {
        None
    }

    /// Whether `code` is a currency this provider has facts for.
    fn is_known_currency(&self, _code: CurrencyCode) -> bool {
        true
    }

    /// Format `value` as a currency string.
    fn format_currency(
        &self,
        value: Decimal,
        locale: &Locale,
        currency: Option<CurrencyCode>,
    ) -> String {
        formatter::render(value, &formatter::locale_profile(self, locale, currency))
    }

    /// Parse a localized decimal string. `None` means not-a-number.
    fn parse_decimal(&self, text: &str, locale: &Locale) -> Option<Decimal> {
        formatter::try_parse(text, &formatter::locale_profile(self, locale, None)).ok()
    }
}

const NBSP: &str = "\u{a0}";

#[derive(Debug)]
struct LocaleEntry {
    tag: &'static str,
    decimal: &'static str,
    grouping: &'static str,
    placement: SymbolPlacement,
    spaced: bool,
    currency: &'static str,
    /// Symbol for the home currency when it differs from the narrow symbol.
    home_symbol: Option<&'static str>,
}

#[derive(Debug)]
struct CurrencyEntry {
    code: &'static str,
    symbol: &'static str,
    narrow: &'static str,
    digits: u32,
}

macro_rules! locale {
    ($tag:literal, $dec:literal, $grp:literal, $place:ident, $spaced:literal, $cur:literal) => {
        locale!($tag, $dec, $grp, $place, $spaced, $cur, None)
    };
    ($tag:literal, $dec:literal, $grp:literal, $place:ident, $spaced:literal, $cur:literal, $home:expr) => {
        LocaleEntry {
            tag: $tag,
            decimal: $dec,
            grouping: $grp,
            placement: SymbolPlacement::$place,
            spaced: $spaced,
            currency: $cur,
            home_symbol: $home,
        }
    };
}

const EN_US: LocaleEntry = locale!("en_US", ".", ",", Prefix, false, "USD");

// First entry per language is that language's fallback.
const LOCALES: &[LocaleEntry] = &[
    EN_US,
    locale!("en_GB", ".", ",", Prefix, false, "GBP"),
    locale!("en_CA", ".", ",", Prefix, false, "CAD"),
    locale!("en_AU", ".", ",", Prefix, false, "AUD"),
    locale!("en_IE", ".", ",", Prefix, false, "EUR"),
    locale!("de_DE", ",", ".", Suffix, true, "EUR"),
    locale!("de_AT", ",", "\u{a0}", Prefix, true, "EUR"),
    locale!("de_CH", ".", "\u{2019}", Prefix, true, "CHF"),
    locale!("fr_FR", ",", "\u{202f}", Suffix, true, "EUR"),
    locale!("fr_CA", ",", "\u{a0}", Suffix, true, "CAD"),
    locale!("es_ES", ",", ".", Suffix, true, "EUR"),
    locale!("es_MX", ".", ",", Prefix, false, "MXN"),
    locale!("it_IT", ",", ".", Suffix, true, "EUR"),
    locale!("nl_NL", ",", ".", Prefix, true, "EUR"),
    locale!("pt_PT", ",", "\u{a0}", Suffix, true, "EUR"),
    locale!("pt_BR", ",", ".", Prefix, true, "BRL"),
    locale!("ja_JP", ".", ",", Prefix, false, "JPY", Some("\u{ffe5}")),
    locale!("zh_CN", ".", ",", Prefix, false, "CNY"),
    locale!("ko_KR", ".", ",", Prefix, false, "KRW"),
    locale!("sv_SE", ",", "\u{a0}", Suffix, true, "SEK"),
    locale!("pl_PL", ",", "\u{a0}", Suffix, true, "PLN"),
];

const CURRENCIES: &[CurrencyEntry] = &[
    CurrencyEntry { code: "USD", symbol: "US$", narrow: "$", digits: 2 },
    CurrencyEntry { code: "EUR", symbol: "€", narrow: "€", digits: 2 },
    CurrencyEntry { code: "GBP", symbol: "£", narrow: "£", digits: 2 },
    CurrencyEntry { code: "JPY", symbol: "¥", narrow: "¥", digits: 0 },
    CurrencyEntry { code: "CNY", symbol: "CN¥", narrow: "¥", digits: 2 },
    CurrencyEntry { code: "KRW", symbol: "₩", narrow: "₩", digits: 0 },
    CurrencyEntry { code: "CAD", symbol: "CA$", narrow: "$", digits: 2 },
    CurrencyEntry { code: "AUD", symbol: "A$", narrow: "$", digits: 2 },
    CurrencyEntry { code: "MXN", symbol: "MX$", narrow: "$", digits: 2 },
    CurrencyEntry { code: "BRL", symbol: "R$", narrow: "R$", digits: 2 },
    CurrencyEntry { code: "CHF", symbol: "CHF", narrow: "CHF", digits: 2 },
    CurrencyEntry { code: "SEK", symbol: "SEK", narrow: "kr", digits: 2 },
    CurrencyEntry { code: "NOK", symbol: "NOK", narrow: "kr", digits: 2 },
    CurrencyEntry { code: "DKK", symbol: "DKK", narrow: "kr.", digits: 2 },
    CurrencyEntry { code: "PLN", symbol: "PLN", narrow: "zł", digits: 2 },
    CurrencyEntry { code: "HUF", symbol: "HUF", narrow: "Ft", digits: 2 },
    CurrencyEntry { code: "INR", symbol: "₹", narrow: "₹", digits: 2 },
    CurrencyEntry { code: "VND", symbol: "₫", narrow: "₫", digits: 0 },
    CurrencyEntry { code: "CLP", symbol: "CLP", narrow: "$", digits: 0 },
    CurrencyEntry { code: "ISK", symbol: "ISK", narrow: "kr", digits: 0 },
    CurrencyEntry { code: "KWD", symbol: "KWD", narrow: "KWD", digits: 3 },
    CurrencyEntry { code: "BHD", symbol: "BHD", narrow: "BHD", digits: 3 },
    CurrencyEntry { code: "JOD", symbol: "JOD", narrow: "JOD", digits: 3 },
    CurrencyEntry { code: "TND", symbol: "TND", narrow: "TND", digits: 3 },
];

/// Table-driven provider covering common locales and ISO 4217 currencies.
///
/// An unknown region falls back to the first listed locale of the same
/// language; an unknown language falls back to `en_US`. An unknown
/// currency is reported through [`LocaleProvider::is_known_currency`] and
/// otherwise treated as the locale's own currency.
///
/// ```
/// use amount_field_core::{BuiltinLocaleProvider, CurrencyCode, Locale, LocaleProvider};
/// use rust_decimal::Decimal;
///
/// let provider = BuiltinLocaleProvider::new();
/// let de = Locale::parse("de_DE").unwrap();
///
/// assert_eq!(provider.decimal_separator(&de, None), ",");
/// assert_eq!(
///     provider.format_currency(Decimal::new(123_450, 2), &de, Some(CurrencyCode::EUR)),
///     "1.234,5\u{a0}€"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocaleProvider;

impl BuiltinLocaleProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Locale tags this provider has tables for.
    pub fn supported_locales() -> impl Iterator<Item = &'static str> {
        LOCALES.iter().map(|entry| entry.tag)
    }

    fn locale_entry(locale: &Locale) -> &'static LocaleEntry {
        let tag = locale.to_string();
        LOCALES
            .iter()
            .find(|entry| entry.tag == tag)
            .or_else(|| {
                LOCALES
                    .iter()
                    .find(|entry| entry.tag.split('_').next() == Some(locale.language()))
            })
            .unwrap_or(&EN_US)
    }

    fn currency_entry(code: &str) -> Option<&'static CurrencyEntry> {
        CURRENCIES.iter().find(|entry| entry.code == code)
    }

    /// The currency entry for `currency`, or the locale's own currency.
    fn resolve(
        locale: &Locale,
        currency: Option<CurrencyCode>,
    ) -> (&'static LocaleEntry, Option<&'static CurrencyEntry>) {
        let entry = Self::locale_entry(locale);
        let currency = currency
            .and_then(|code| Self::currency_entry(code.as_str()))
            .or_else(|| Self::currency_entry(entry.currency));
        (entry, currency)
    }
}

impl LocaleProvider for BuiltinLocaleProvider {
    fn currency_symbol(&self, locale: &Locale, currency: Option<CurrencyCode>) -> String {
        let (entry, currency) = Self::resolve(locale, currency);
        let Some(currency) = currency else {
            return String::new();
        };

        let symbol = if currency.code == entry.currency {
            entry.home_symbol.unwrap_or(currency.narrow)
        } else {
            currency.symbol
        };

        let alphabetic_edge = match entry.placement {
            SymbolPlacement::Prefix => symbol.chars().next_back(),
            SymbolPlacement::Suffix => symbol.chars().next(),
        }
        .is_some_and(char::is_alphabetic);
        let spacing = if entry.spaced || alphabetic_edge {
            NBSP
        } else {
            ""
        };

        match entry.placement {
            SymbolPlacement::Prefix => format!("{symbol}{spacing}"),
            SymbolPlacement::Suffix => format!("{spacing}{symbol}"),
        }
    }

    fn symbol_placement(
        &self,
        locale: &Locale,
        _currency: Option<CurrencyCode>,
    ) -> SymbolPlacement {
        Self::locale_entry(locale).placement
    }

    fn grouping_separator(&self, locale: &Locale, _currency: Option<CurrencyCode>) -> String {
        Self::locale_entry(locale).grouping.to_owned()
    }

    fn decimal_separator(&self, locale: &Locale, _currency: Option<CurrencyCode>) -> String {
        Self::locale_entry(locale).decimal.to_owned()
    }

    fn max_fraction_digits(&self, locale: &Locale, currency: Option<CurrencyCode>) -> u32 {
        Self::resolve(locale, currency).1.map_or(2, |c| c.digits)
    }

    fn default_currency(&self, locale: &Locale) -> Option<CurrencyCode> {
        CurrencyCode::parse(Self::locale_entry(locale).currency).ok()
    }

    fn is_known_currency(&self, code: CurrencyCode) -> bool {
        Self::currency_entry(code.as_str()).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[test]
    fn test_home_currency_uses_narrow_symbol() {
        let provider = BuiltinLocaleProvider::new();
        assert_eq!(provider.currency_symbol(&locale("en_US"), None), "$");
        assert_eq!(
            provider.currency_symbol(&locale("en_CA"), Some(CurrencyCode::CAD)),
            "$"
        );
        assert_eq!(provider.currency_symbol(&locale("ja_JP"), None), "\u{ffe5}");
    }

    #[test]
    fn test_foreign_currency_uses_international_symbol() {
        let provider = BuiltinLocaleProvider::new();
        assert_eq!(
            provider.currency_symbol(&locale("en_GB"), Some(CurrencyCode::USD)),
            "US$"
        );
        assert_eq!(
            provider.currency_symbol(&locale("en_US"), Some(CurrencyCode::JPY)),
            "¥"
        );
    }

    #[test]
    fn test_symbol_spacing() {
        let provider = BuiltinLocaleProvider::new();
        assert_eq!(provider.currency_symbol(&locale("de_DE"), None), "\u{a0}€");
        assert_eq!(provider.currency_symbol(&locale("pt_BR"), None), "R$\u{a0}");
        assert_eq!(
            provider.currency_symbol(&locale("en_US"), Some(CurrencyCode::CHF)),
            "CHF\u{a0}"
        );
    }

    #[test]
    fn test_fraction_digits_follow_currency() {
        let provider = BuiltinLocaleProvider::new();
        let us = locale("en_US");
        assert_eq!(provider.max_fraction_digits(&us, None), 2);
        assert_eq!(provider.max_fraction_digits(&us, Some(CurrencyCode::JPY)), 0);
        assert_eq!(provider.max_fraction_digits(&us, Some(CurrencyCode::KWD)), 3);
    }

    #[test]
    fn test_region_fallback_to_language() {
        let provider = BuiltinLocaleProvider::new();
        let swiss_french = locale("fr_CH");
        assert_eq!(provider.decimal_separator(&swiss_french, None), ",");
        assert_eq!(
            provider.default_currency(&swiss_french),
            Some(CurrencyCode::EUR)
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_en_us() {
        let provider = BuiltinLocaleProvider::new();
        let klingon = locale("tlh");
        assert_eq!(provider.decimal_separator(&klingon, None), ".");
        assert_eq!(provider.default_currency(&klingon), Some(CurrencyCode::USD));
    }

    #[test]
    fn test_unknown_currency_uses_locale_currency() {
        let provider = BuiltinLocaleProvider::new();
        let xyz = CurrencyCode::parse("XYZ").unwrap();
        assert!(!provider.is_known_currency(xyz));
        assert_eq!(provider.currency_symbol(&locale("de_DE"), Some(xyz)), "\u{a0}€");
    }

    #[test]
    fn test_parse_decimal() {
        let provider = BuiltinLocaleProvider::new();
        assert_eq!(
            provider.parse_decimal("1.234,5", &locale("de_DE")),
            Some(Decimal::new(12345, 1))
        );
        assert_eq!(provider.parse_decimal("abc", &locale("de_DE")), None);
    }

    #[test]
    fn test_supported_locales_are_parseable() {
        for tag in BuiltinLocaleProvider::supported_locales() {
            assert_eq!(locale(tag).to_string(), tag);
        }
    }
}
