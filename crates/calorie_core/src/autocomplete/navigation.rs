//! Keyboard focus over the suggestion list.

use serde::Serialize;

/// Which suggestion, if any, the keyboard cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Focus {
    #[default]
    Unfocused,
    /// Always `< len` of the list it was computed for.
    Focused(usize),
}

impl Focus {
    /// Moves down with wraparound; from `Unfocused` lands on the first entry.
    pub fn next(self, len: usize) -> Self {
        if len == 0 {
            return Self::Unfocused;
        }
        match self {
            Self::Unfocused => Self::Focused(0),
            Self::Focused(index) => Self::Focused((index + 1) % len),
        }
    }

    /// Moves up with wraparound; from `Unfocused` lands on the last entry.
    pub fn previous(self, len: usize) -> Self {
        if len == 0 {
            return Self::Unfocused;
        }
        match self {
            Self::Unfocused => Self::Focused(len - 1),
            Self::Focused(index) => Self::Focused((index + len - 1) % len),
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Unfocused => None,
            Self::Focused(index) => Some(index),
        }
    }
}
