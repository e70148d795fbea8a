//! Field focus state.

use serde::{Deserialize, Serialize};

/// Whether the field is showing formatted text or being typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// Not focused. Shows `render(amount)`.
    #[default]
    Idle,
    /// Focused. Keystrokes are validated and reformatted.
    Editing,
}

impl FieldState {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}

impl std::fmt::Display for FieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Editing => write!(f, "editing"),
        }
    }
}
