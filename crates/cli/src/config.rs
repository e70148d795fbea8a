//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AMOUNT_FIELD_LOCALE` - Locale tag such as `en_US` or `de-DE`
//!   (default: the locale in `LANG`, else `en_US`)
//! - `AMOUNT_FIELD_CURRENCY` - ISO 4217 currency code (default: the locale's currency)
//! - `AMOUNT_FIELD_SEPARATOR_MATCHING` - `token` or `char-set` (default: `token`)
//!
//! Command line flags override the environment.

use amount_field_core::{
    AmountField, BuiltinLocaleProvider, CurrencyCode, Locale, SeparatorMatching,
};
use thiserror::Error;

const LOCALE_VAR: &str = "AMOUNT_FIELD_LOCALE";
const CURRENCY_VAR: &str = "AMOUNT_FIELD_CURRENCY";
const SEPARATOR_MATCHING_VAR: &str = "AMOUNT_FIELD_SEPARATOR_MATCHING";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid --{0} flag: {1}")]
    InvalidFlag(&'static str, String),
}

/// Resolved locale settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub locale: Locale,
    /// `None` means the locale's own currency.
    pub currency: Option<CurrencyCode>,
    pub separator_matching: SeparatorMatching,
}

impl CliConfig {
    /// Load configuration from the process environment and `.env`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let locale = match lookup(LOCALE_VAR) {
            Some(tag) => Locale::parse(&tag)
                .map_err(|e| ConfigError::InvalidEnvVar(LOCALE_VAR.to_string(), e.to_string()))?,
            None => locale_from_lang(lookup("LANG").as_deref()),
        };

        let currency = lookup(CURRENCY_VAR)
            .map(|code| {
                CurrencyCode::parse(&code)
                    .map_err(|e| ConfigError::InvalidEnvVar(CURRENCY_VAR.to_string(), e.to_string()))
            })
            .transpose()?;

        let separator_matching = get_or_default(&lookup, SEPARATOR_MATCHING_VAR, "token")
            .parse::<SeparatorMatching>()
            .map_err(|e| ConfigError::InvalidEnvVar(SEPARATOR_MATCHING_VAR.to_string(), e))?;

        Ok(Self {
            locale,
            currency,
            separator_matching,
        })
    }

    /// Apply command line flags on top of the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a flag value is unparseable.
    pub fn with_overrides(
        mut self,
        locale: Option<&str>,
        currency: Option<&str>,
        separator_matching: Option<SeparatorMatching>,
    ) -> Result<Self, ConfigError> {
        if let Some(tag) = locale {
            self.locale =
                Locale::parse(tag).map_err(|e| ConfigError::InvalidFlag("locale", e.to_string()))?;
        }
        if let Some(code) = currency {
            self.currency = Some(
                CurrencyCode::parse(code)
                    .map_err(|e| ConfigError::InvalidFlag("currency", e.to_string()))?,
            );
        }
        if let Some(matching) = separator_matching {
            self.separator_matching = matching;
        }
        Ok(self)
    }

    /// An idle field for these settings, backed by the built-in tables.
    #[must_use]
    pub fn field(&self) -> AmountField {
        AmountField::new(BuiltinLocaleProvider::new(), self.locale.clone(), self.currency)
            .with_separator_matching(self.separator_matching)
    }
}

/// Locale from a POSIX `LANG` value such as `de_DE.UTF-8`.
fn locale_from_lang(lang: Option<&str>) -> Locale {
    lang.and_then(|value| match Locale::parse(value) {
        Ok(locale) => Some(locale),
        Err(e) => {
            tracing::debug!(lang = value, error = %e, "Ignoring LANG");
            None
        }
    })
    .unwrap_or_default()
}

/// Get a variable with a default value.
fn get_or_default(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}
