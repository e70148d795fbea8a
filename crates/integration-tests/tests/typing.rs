//! Keystroke scenarios across locales.
//!
//! Each test focuses a field, types keys at the caret and checks what the
//! host would show.

#![allow(clippy::unwrap_used)]

use amount_field_core::{Decimal, FieldState, Rejection, TextRange};
use amount_field_integration_tests::{editing_field, type_keys};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// en_US / USD
// =============================================================================

#[test]
fn test_en_us_typing_session() {
    let mut field = editing_field("en_US", Some("USD"));
    assert_eq!(field.display(), "$0");

    let expected = [
        ('1', "1", "$1"),
        ('2', "12", "$12"),
        ('3', "123", "$123"),
        ('4', "1234", "$1,234"),
        ('.', "1234", "$1,234."),
        ('5', "1234.5", "$1,234.5"),
    ];
    for (key, amount, display) in expected {
        let outcome = type_keys(&mut field, &key.to_string()).remove(0);
        assert!(outcome.is_committed(), "{key:?} was rejected");
        assert_eq!(field.amount(), dec(amount), "after {key:?}");
        assert_eq!(field.display(), display, "after {key:?}");
        assert_eq!(field.caret(), field.end_of_document(), "after {key:?}");
    }
}

#[test]
fn test_third_fraction_digit_leaves_text_unchanged() {
    let mut field = editing_field("en_US", Some("USD"));
    type_keys(&mut field, "1234.5");

    let outcome = field.edit(TextRange::caret(8), "9");
    assert_eq!(
        outcome.rejection(),
        Some(Rejection::TooManyFractionDigits { max: 2 })
    );
    assert_eq!(field.display(), "$1,234.5");
    assert_eq!(field.amount(), dec("1234.5"));
}

#[test]
fn test_external_reset_mid_edit() {
    let mut field = editing_field("en_US", Some("USD"));
    type_keys(&mut field, "42.0");
    assert_eq!(field.display(), "$42.0");

    field.set_amount(Decimal::ZERO);
    assert_eq!(field.display(), "$0");
    assert_eq!(field.caret(), field.end_of_document());
    assert_eq!(field.state(), FieldState::Idle);
}

#[test]
fn test_caret_follows_digit_when_grouping_appears() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "99999");
    assert_eq!(field.display(), "$99,999");
    assert_eq!(field.caret(), 7);

    type_keys(&mut field, "9");
    assert_eq!(field.display(), "$999,999");
    assert_eq!(field.caret(), 8);

    type_keys(&mut field, "9");
    assert_eq!(field.display(), "$9,999,999");
    assert_eq!(field.caret(), 10);
}

#[test]
fn test_caret_follows_when_grouping_disappears() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "1000<");
    assert_eq!(field.display(), "$100");
    assert_eq!(field.caret(), 4);
}

#[test]
fn test_blur_drops_pending_fraction() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "7.50");
    assert_eq!(field.display(), "$7.50");

    field.end_editing();
    assert_eq!(field.display(), "$7.5");
    assert_eq!(field.amount(), dec("7.5"));
}

#[test]
fn test_leading_zeros_collapse() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "0007");
    assert_eq!(field.display(), "$7");
    assert_eq!(field.caret(), 2);
}

#[test]
fn test_paste_replaces_selection() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "1234");
    let outcome = field.edit(TextRange::new(1, 6), "98765.4");
    assert!(outcome.is_committed());
    assert_eq!(field.display(), "$98,765.4");
    assert_eq!(field.caret(), 9);
}

// =============================================================================
// Suffix-symbol locales
// =============================================================================

#[test]
fn test_fr_fr_narrow_space_grouping() {
    let mut field = editing_field("fr_FR", None);
    assert_eq!(field.display(), "0\u{a0}€");

    type_keys(&mut field, "1234,5");
    assert_eq!(field.display(), "1\u{202f}234,5\u{a0}€");
    assert_eq!(field.amount(), dec("1234.5"));
    assert_eq!(field.caret(), 7);
}

#[test]
fn test_de_de_caret_never_passes_symbol() {
    let mut field = editing_field("de_DE", None);
    for (i, outcome) in type_keys(&mut field, "12345,67").into_iter().enumerate() {
        assert!(outcome.is_committed(), "key {i} rejected");
        assert_eq!(field.caret(), field.end_of_document());
        assert!(field.is_caret_visible_at(field.caret()));
    }
    assert_eq!(field.display(), "12.345,67\u{a0}€");
    assert_eq!(field.caret(), 9);
}

#[test]
fn test_de_de_rejects_dot_as_decimal() {
    let mut field = editing_field("de_DE", None);
    type_keys(&mut field, "12");
    let outcome = field.edit(TextRange::caret(2), ".");
    assert_eq!(outcome.rejection(), Some(Rejection::InvalidCharacters));
}

#[test]
fn test_sv_se_suffix_with_letters() {
    let mut field = editing_field("sv_SE", None);
    type_keys(&mut field, "2500");
    assert_eq!(field.display(), "2\u{a0}500\u{a0}kr");
    assert_eq!(field.caret(), 5);
}

// =============================================================================
// Prefix symbols with spacing
// =============================================================================

#[test]
fn test_pt_br_prefix_with_space() {
    let mut field = editing_field("pt_BR", None);
    assert_eq!(field.display(), "R$\u{a0}0");
    assert_eq!(field.start_of_document(), 3);

    type_keys(&mut field, "1000,5");
    assert_eq!(field.display(), "R$\u{a0}1.000,5");
    assert_eq!(field.caret(), 10);
}

#[test]
fn test_de_ch_apostrophe_grouping() {
    let mut field = editing_field("de_CH", None);
    type_keys(&mut field, "12345.6");
    assert_eq!(field.display(), "CHF\u{a0}12\u{2019}345.6");
}

// =============================================================================
// Fraction digit limits
// =============================================================================

#[test]
fn test_yen_has_no_fraction() {
    let mut field = editing_field("ja_JP", None);
    let outcomes = type_keys(&mut field, "500.");
    assert_eq!(
        outcomes.last().and_then(amount_field_core::EditOutcome::rejection),
        Some(Rejection::FractionNotAllowed)
    );
    assert_eq!(field.display(), "\u{ffe5}500");
}

#[test]
fn test_dinar_allows_three() {
    let mut field = editing_field("en_US", Some("KWD"));
    let outcomes = type_keys(&mut field, "1.2345");
    assert!(outcomes.iter().take(5).all(amount_field_core::EditOutcome::is_committed));
    assert!(!outcomes.last().unwrap().is_committed());
    assert_eq!(field.amount(), dec("1.234"));
}

#[test]
fn test_currency_switch_mid_session() {
    let mut field = editing_field("en_US", None);
    type_keys(&mut field, "19.99");
    field.set_currency_code(Some(amount_field_integration_tests::currency("JPY")));
    assert_eq!(field.display(), "¥20");
    assert_eq!(field.amount(), dec("19.99"));
}

// =============================================================================
// Host bridge
// =============================================================================

#[test]
fn test_outcome_json_for_host_bridge() {
    let mut field = editing_field("en_US", None);

    let json = serde_json::to_value(field.type_text("5")).unwrap();
    assert_eq!(json["outcome"], "committed");
    assert_eq!(json["amount"], "5");
    assert_eq!(json["display"], "$5");
    assert_eq!(json["caret"], 2);

    let json = serde_json::to_value(field.type_text("x")).unwrap();
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["reason"], "invalid_characters");
}
