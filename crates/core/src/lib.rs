//! Amount Field Core - live-editing currency amount formatter.
//!
//! This crate backs a currency text input. It renders a decimal amount as a
//! locale-styled display string and interprets every keystroke edit made
//! against that string, keeping the caret attached to the digit the user
//! just typed while grouping separators come and go.
//!
//! # Architecture
//!
//! The core contains no I/O and no UI. The host widget delivers edits
//! (`range` + replacement text) and receives back a display string and a
//! caret offset. Locale facts come from a [`LocaleProvider`].
//!
//! # Modules
//!
//! - [`types`] - Locale, currency code, locale profile, edit and state types
//! - [`provider`] - The locale provider seam and a built-in table provider
//! - [`formatter`] - `render`, `parse` and `locale_profile`
//! - [`text`] - Character-offset and separator matching helpers
//! - [`interpreter`] - The edit validation and reformat state machine
//! - [`binding`] - Observable amount adapter for host code
//!
//! # Example
//!
//! ```
//! use amount_field_core::{AmountField, BuiltinLocaleProvider, Locale, TextRange};
//!
//! let locale = Locale::parse("en_US").unwrap();
//! let mut field = AmountField::new(BuiltinLocaleProvider::new(), locale, None);
//! field.begin_editing();
//!
//! field.edit(TextRange::caret(2), "1234");
//! assert_eq!(field.display(), "$1,234");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod binding;
pub mod formatter;
pub mod interpreter;
pub mod provider;
pub mod text;
pub mod types;

pub use binding::AmountBinding;
pub use formatter::{ParseAmountError, locale_profile, parse, render, round_to_profile, try_parse};
pub use interpreter::{AmountField, EditDelegate, EditOutcome, Reformat, Rejection, validate_edit};
pub use provider::{BuiltinLocaleProvider, LocaleProvider};
pub use types::*;

pub use rust_decimal::Decimal;
