//! ISO 4217 currency code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyCodeError {
    /// The input is not exactly three characters.
    #[error("currency code must be 3 letters, got {0:?}")]
    InvalidLength(String),
    /// The input contains a non-letter.
    #[error("currency code must contain only ASCII letters, got {0:?}")]
    InvalidCharacter(String),
}

/// A well-formed ISO 4217 alphabetic currency code.
///
/// Well-formed is not the same as known: `XYZ` parses, and the locale
/// provider decides what to do with codes it does not recognize.
///
/// ```
/// use amount_field_core::CurrencyCode;
///
/// assert_eq!(CurrencyCode::parse("eur").unwrap(), CurrencyCode::EUR);
/// assert!(CurrencyCode::parse("EURO").is_err());
/// assert!(CurrencyCode::parse("E1R").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: Self = Self(*b"USD");
    pub const EUR: Self = Self(*b"EUR");
    pub const GBP: Self = Self(*b"GBP");
    pub const JPY: Self = Self(*b"JPY");
    pub const CHF: Self = Self(*b"CHF");
    pub const CAD: Self = Self(*b"CAD");
    pub const AUD: Self = Self(*b"AUD");
    pub const BRL: Self = Self(*b"BRL");
    pub const KWD: Self = Self(*b"KWD");

    /// Parse a `CurrencyCode`, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly three ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        let bytes = s.trim().as_bytes();
        let code: [u8; 3] = bytes
            .try_into()
            .map_err(|_| CurrencyCodeError::InvalidLength(s.to_owned()))?;

        if !code.iter().all(u8::is_ascii_alphabetic) {
            return Err(CurrencyCodeError::InvalidCharacter(s.to_owned()));
        }

        Ok(Self(code.map(|b| b.to_ascii_uppercase())))
    }

    /// Returns the code as an uppercase string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction guarantees three ASCII letters.
        core::str::from_utf8(&self.0).unwrap_or("XXX")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_owned()
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        assert_eq!(CurrencyCode::parse("usd").unwrap(), CurrencyCode::USD);
        assert_eq!(CurrencyCode::parse(" chf ").unwrap().as_str(), "CHF");
    }

    #[test]
    fn test_parse_unknown_but_well_formed() {
        assert_eq!(CurrencyCode::parse("XYZ").unwrap().to_string(), "XYZ");
    }

    #[test]
    fn test_parse_invalid_length() {
        assert!(matches!(
            CurrencyCode::parse("US"),
            Err(CurrencyCodeError::InvalidLength(_))
        ));
        assert!(matches!(
            CurrencyCode::parse("€€"),
            Err(CurrencyCodeError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            CurrencyCode::parse("U$D"),
            Err(CurrencyCodeError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&CurrencyCode::JPY).unwrap();
        assert_eq!(json, "\"JPY\"");

        let parsed: CurrencyCode = serde_json::from_str("\"jpy\"").unwrap();
        assert_eq!(parsed, CurrencyCode::JPY);
    }
}
