//! `type`: replay keystrokes through the editor and show every step.
//!
//! Each character of the key string is typed at the caret, except:
//! - `<` deletes the character before the caret
//! - `|` ends editing (focus lost)

use std::fmt;

use amount_field_core::{AmountField, Decimal, EditOutcome, FieldState, Reformat, TextRange};
use serde::Serialize;

use crate::config::CliConfig;

const BACKSPACE: char = '<';
const BLUR: char = '|';

/// One replayed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub key: char,
    pub range: TextRange,
    pub outcome: EditOutcome,
    pub display: String,
    pub caret: usize,
}

/// Every step plus where the field ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<Step>,
    pub amount: Decimal,
    pub display: String,
    pub caret: usize,
    pub state: FieldState,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            let status = match step.outcome.rejection() {
                Some(reason) => format!("rejected: {reason}"),
                None => "ok".to_owned(),
            };
            writeln!(
                f,
                "{:?}\t{}\t{}\t{}",
                step.key,
                show_caret(&step.display, step.caret),
                step.caret,
                status
            )?;
        }
        write!(f, "{}\t{}\t{}", self.display, self.amount, self.state)
    }
}

/// `display` with a `|` drawn at `caret`.
fn show_caret(display: &str, caret: usize) -> String {
    let mut out = String::with_capacity(display.len() + 1);
    for (i, c) in display.chars().enumerate() {
        if i == caret {
            out.push('|');
        }
        out.push(c);
    }
    if caret >= display.chars().count() {
        out.push('|');
    }
    out
}

/// Replay `keys` against a field starting at `start`.
#[must_use]
pub fn simulate(config: &CliConfig, start: Option<Decimal>, keys: &str) -> SimulationReport {
    let mut field = config.field();
    if let Some(amount) = start {
        field = field.with_amount(amount);
    }
    field.begin_editing();

    let steps = keys.chars().map(|key| press(&mut field, key)).collect();
    tracing::info!(
        keys,
        amount = %field.amount(),
        display = field.display(),
        "Replayed keystrokes"
    );

    SimulationReport {
        steps,
        amount: field.amount(),
        display: field.display().to_owned(),
        caret: field.caret(),
        state: field.state(),
    }
}

fn press(field: &mut AmountField, key: char) -> Step {
    let (range, outcome) = match key {
        BACKSPACE => {
            let range = TextRange::new(field.caret().saturating_sub(1), field.caret());
            (range, field.backspace())
        }
        BLUR => {
            field.end_editing();
            let reformat = Reformat {
                amount: field.amount(),
                display: field.display().to_owned(),
                caret: field.caret(),
            };
            (TextRange::caret(field.caret()), EditOutcome::Committed(reformat))
        }
        _ => {
            let range = TextRange::caret(field.caret());
            let mut buf = [0; 4];
            (range, field.type_text(key.encode_utf8(&mut buf)))
        }
    };

    Step {
        key,
        range,
        outcome,
        display: field.display().to_owned(),
        caret: field.caret(),
    }
}
