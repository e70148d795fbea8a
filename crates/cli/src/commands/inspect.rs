//! `profile` and `locales`: inspect what the locale tables resolve to.

use std::fmt;

use amount_field_core::{BuiltinLocaleProvider, LocaleProfile};
use serde::Serialize;

use crate::config::CliConfig;

/// The resolved locale profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileReport(pub LocaleProfile);

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = &self.0;
        writeln!(f, "locale              {}", profile.locale())?;
        writeln!(
            f,
            "currency            {}",
            profile
                .currency_code()
                .map_or_else(|| "(locale default)".to_owned(), |c| c.to_string())
        )?;
        writeln!(f, "symbol              {:?}", profile.symbol())?;
        writeln!(f, "placement           {:?}", profile.placement())?;
        writeln!(f, "grouping separator  {:?}", profile.grouping_separator())?;
        writeln!(f, "decimal separator   {:?}", profile.decimal_separator())?;
        writeln!(f, "fraction digits     {}", profile.max_fraction_digits())?;
        write!(f, "separator matching  {}", profile.separator_matching())
    }
}

#[must_use]
pub fn profile(config: &CliConfig) -> ProfileReport {
    ProfileReport(config.field().profile().clone())
}

/// Locale tags with built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalesReport {
    pub locales: Vec<&'static str>,
}

impl fmt::Display for LocalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locales.join("\n"))
    }
}

#[must_use]
pub fn locales() -> LocalesReport {
    LocalesReport {
        locales: BuiltinLocaleProvider::supported_locales().collect(),
    }
}
