//! `render` and `parse`: one-shot conversions between amounts and display strings.

use std::fmt;

use amount_field_core::{Decimal, LocaleProfile, formatter};
use serde::Serialize;

use super::CommandError;
use crate::config::CliConfig;

/// An amount next to its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountReport {
    pub amount: Decimal,
    pub display: String,
    pub profile: LocaleProfile,
}

impl fmt::Display for AmountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.display, self.amount)
    }
}

/// Format `amount` for display.
#[must_use]
pub fn render(config: &CliConfig, amount: Decimal) -> AmountReport {
    let profile = config.field().profile().clone();
    let display = formatter::render(amount, &profile);
    // `tracing` imports a `display` helper inside its macros, shadowing the local.
    let rendered = &display;
    tracing::debug!(%amount, display = %rendered, "Rendered amount");
    AmountReport {
        amount,
        display,
        profile,
    }
}

/// Read a display string back into an amount.
///
/// With `strict`, unreadable text is an error; otherwise it reads as zero
/// the way the editor treats it.
///
/// # Errors
///
/// Returns [`CommandError::Parse`] for unreadable text in strict mode.
pub fn parse(config: &CliConfig, text: &str, strict: bool) -> Result<AmountReport, CommandError> {
    let profile = config.field().profile().clone();
    let amount = if strict {
        formatter::try_parse(text, &profile)?
    } else {
        formatter::parse(text, &profile)
    };
    Ok(AmountReport {
        amount,
        display: formatter::render(amount, &profile),
        profile,
    })
}
