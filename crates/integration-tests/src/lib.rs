//! Integration tests for Amount Field.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p amount-field-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `typing` - Keystroke scenarios across locales
//! - `properties` - Render/parse and caret invariants over random amounts
//! - `binding` - Observable amount adapter
//! - `provider` - Custom locale providers
//!
//! This library holds the shared fixtures.

use amount_field_core::{
    AmountField, BuiltinLocaleProvider, CurrencyCode, EditOutcome, Locale, LocaleProfile,
    formatter,
};

/// Backspace in [`type_keys`] strings.
pub const BACKSPACE: char = '<';

/// Parse a locale tag, panicking on fixture typos.
///
/// # Panics
///
/// Panics if `tag` is not a valid locale tag.
#[must_use]
pub fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap_or_else(|e| panic!("bad fixture locale {tag:?}: {e}"))
}

/// Parse a currency code, panicking on fixture typos.
///
/// # Panics
///
/// Panics if `code` is not a valid currency code.
#[must_use]
pub fn currency(code: &str) -> CurrencyCode {
    CurrencyCode::parse(code).unwrap_or_else(|e| panic!("bad fixture currency {code:?}: {e}"))
}

/// A focused field backed by the built-in tables.
#[must_use]
pub fn editing_field(tag: &str, code: Option<&str>) -> AmountField {
    let mut field = AmountField::new(BuiltinLocaleProvider::new(), locale(tag), code.map(currency));
    field.begin_editing();
    field
}

/// The profile the built-in tables resolve for `tag` and `code`.
#[must_use]
pub fn profile(tag: &str, code: Option<&str>) -> LocaleProfile {
    formatter::locale_profile(&BuiltinLocaleProvider::new(), &locale(tag), code.map(currency))
}

/// Type every key at the caret; [`BACKSPACE`] deletes before the caret.
pub fn type_keys(field: &mut AmountField, keys: &str) -> Vec<EditOutcome> {
    keys.chars()
        .map(|key| {
            if key == BACKSPACE {
                field.backspace()
            } else {
                let mut buf = [0; 4];
                field.type_text(key.encode_utf8(&mut buf))
            }
        })
        .collect()
}
