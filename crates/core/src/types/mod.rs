//! Core types for the amount field.
//!
//! This module provides the value types shared by the formatter, the edit
//! interpreter and the binding adapter.

pub mod currency;
pub mod edit;
pub mod locale;
pub mod profile;
pub mod state;

pub use currency::{CurrencyCode, CurrencyCodeError};
pub use edit::{PendingEdit, TextRange};
pub use locale::{Locale, LocaleError};
pub use profile::{LocaleFacts, LocaleProfile, ProfileError, SeparatorMatching, SymbolPlacement};
pub use state::FieldState;
