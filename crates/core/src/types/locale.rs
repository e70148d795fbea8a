//! Locale identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("locale cannot be empty")]
    Empty,
    /// The language subtag is not 2-3 ASCII letters.
    #[error("invalid language subtag: {0}")]
    InvalidLanguage(String),
    /// The region subtag is not 2 ASCII letters or 3 digits.
    #[error("invalid region subtag: {0}")]
    InvalidRegion(String),
    /// More subtags than `language_REGION`.
    #[error("unsupported locale identifier: {0}")]
    Unsupported(String),
}

/// A `language[_REGION]` locale identifier.
///
/// Accepts both `_` and `-` as the subtag delimiter and ignores a POSIX
/// encoding or modifier suffix, so values read from `LANG` parse directly.
/// The canonical form uses a lowercase language, an uppercase region and `_`.
///
/// ## Examples
///
/// ```
/// use amount_field_core::Locale;
///
/// assert_eq!(Locale::parse("en_US").unwrap().to_string(), "en_US");
/// assert_eq!(Locale::parse("pt-br").unwrap().to_string(), "pt_BR");
/// assert_eq!(Locale::parse("de_DE.UTF-8@euro").unwrap().to_string(), "de_DE");
/// assert_eq!(Locale::parse("fr").unwrap().region(), None);
///
/// assert!(Locale::parse("").is_err());
/// assert!(Locale::parse("C").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parse a `Locale` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Has a language subtag that is not 2-3 ASCII letters
    /// - Has a region subtag that is not 2 ASCII letters or 3 ASCII digits
    /// - Has more than two subtags
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let trimmed = s
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();

        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();

        if parts.next().is_some() {
            return Err(LocaleError::Unsupported(s.to_owned()));
        }

        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::InvalidLanguage(language.to_owned()));
        }

        let region = match region {
            None => None,
            Some(r) if r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(r.to_ascii_uppercase())
            }
            Some(r) if r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()) => Some(r.to_owned()),
            Some(r) => return Err(LocaleError::InvalidRegion(r.to_owned())),
        };

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }

    /// The `en_US` locale.
    #[must_use]
    pub fn en_us() -> Self {
        Self {
            language: "en".to_owned(),
            region: Some("US".to_owned()),
        }
    }

    /// Returns the lowercase language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the uppercase region subtag, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{region}", self.language),
            None => write!(f, "{}", self.language),
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
