pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod name;
pub mod parser;
pub mod roster;

pub use checker::RosterValidator;
pub use config::Config;
pub use name::Name;
pub use roster::Roster;

use serde::Serialize;

/// Outcome of checking one batch of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpellingResult {
    /// Every line parsed. Both fields hold one entry per input line, joined
    /// by the batch delimiter; an empty diagnostic means the line is fine.
    Checked {
        canonical_lines: String,
        marked_lines: String,
    },
    /// A line could not be parsed and the whole batch was abandoned.
    Rejected { message: String, line_number: usize },
}

impl SpellingResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SpellingResult::Rejected { .. })
    }
}

/// Per-line view of a [`SpellingResult::Checked`] batch, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedLine {
    pub line: usize,
    pub canonical: String,
    pub diagnostic: String,
}
