pub mod dictionary;
pub mod suggestions;

use crate::name::Name;
use crate::parser::{self, fixup_capitals, MAX_WORDS, MIN_WORDS};
use crate::roster::{Roster, RosterSource, RosterStore};
use crate::{CheckedLine, Config, SpellingResult};
use anyhow::Result;
use dictionary::{FstDictionary, WordDictionary};
use thiserror::Error;

/// Suggestions requested per unknown word unless configured otherwise.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 2;

/// How a parsed name relates to the dictionary and the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Both words known and the pair is registered.
    Registered,
    /// Both words known, but never registered together.
    UnregisteredPair,
    BothUnknown { suggestions: Vec<String> },
    FirstUnknown { suggestions: Vec<String> },
    LastUnknown { suggestions: Vec<String> },
}

impl Classification {
    /// The diagnostic line for `name`; empty when there is nothing to report.
    pub fn diagnostic(&self, name: &Name) -> String {
        match self {
            Classification::Registered => String::new(),
            Classification::UnregisteredPair => {
                format!("Error: \"{}\" is not a registered name pair.", name)
            }
            Classification::BothUnknown { suggestions } => format!(
                "Error: Both \"{}\" and \"{}\" are unregistered names.{}",
                name.first(),
                name.last(),
                suggestion_clause(suggestions)
            ),
            Classification::FirstUnknown { suggestions } => format!(
                "Error: \"{}\" is not a registered first name.{}",
                name.first(),
                suggestion_clause(suggestions)
            ),
            Classification::LastUnknown { suggestions } => format!(
                "Error: \"{}\" is not a registered last name.{}",
                name.last(),
                suggestion_clause(suggestions)
            ),
        }
    }
}

fn suggestion_clause(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(" or "))
    }
}

/// A batch was abandoned because one line is not a 2 to 4 word name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
    pub line_number: usize,
}

/// What a reload did. Collaborator failures end up in `warnings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    pub reloaded: bool,
    pub pairs: usize,
    pub words: usize,
    pub warnings: Vec<String>,
}

/// The roster and dictionary a batch is checked against.
struct Snapshot<D> {
    roster: Roster,
    dictionary: D,
}

/// Checks batches of typed names against the registered roster.
pub struct RosterValidator<D: WordDictionary = FstDictionary> {
    snapshot: Snapshot<D>,
    delimiter: char,
    max_suggestions: usize,
}

impl RosterValidator<FstDictionary> {
    /// Build a validator over whatever the store currently holds.
    pub fn from_store(store: &RosterStore, config: &Config) -> Result<Self> {
        let roster = store.load_pairs_or_default();
        let dictionary = store.load_dictionary()?;

        tracing::info!(
            pairs = roster.len(),
            words = dictionary.len(),
            "loaded name database"
        );

        Ok(Self::new(roster, dictionary, config.delimiter)
            .with_max_suggestions(config.max_suggestions))
    }
}

impl<D: WordDictionary> RosterValidator<D> {
    pub fn new(roster: Roster, dictionary: D, delimiter: char) -> Self {
        Self {
            snapshot: Snapshot { roster, dictionary },
            delimiter,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn roster(&self) -> &Roster {
        &self.snapshot.roster
    }

    pub fn dictionary(&self) -> &D {
        &self.snapshot.dictionary
    }

    /// Classify one already-parsed name.
    pub fn classify(&self, name: &Name) -> Classification {
        let dictionary = &self.snapshot.dictionary;
        let ok_first = dictionary.known(name.first());
        let ok_last = dictionary.known(name.last());

        match (ok_first, ok_last) {
            (true, true) if self.snapshot.roster.contains(name) => Classification::Registered,
            (true, true) => Classification::UnregisteredPair,
            (false, false) => Classification::BothUnknown {
                suggestions: self.suggestions_for(&[name.first(), name.last()]),
            },
            (false, true) => Classification::FirstUnknown {
                suggestions: self.suggestions_for(&[name.first()]),
            },
            (true, false) => Classification::LastUnknown {
                suggestions: self.suggestions_for(&[name.last()]),
            },
        }
    }

    /// Capped, capitalized candidates for each word in turn.
    fn suggestions_for(&self, words: &[&str]) -> Vec<String> {
        words
            .iter()
            .flat_map(|word| {
                self.snapshot
                    .dictionary
                    .suggest(word, self.max_suggestions)
                    .into_iter()
                    .take(self.max_suggestions)
            })
            .map(|candidate| fixup_capitals(&candidate))
            .collect()
    }

    /// Check every line of `text`, split on `delimiter`.
    ///
    /// Blank lines pass through as empty entries. The first line that is not
    /// a 2 to 4 word name rejects the whole batch.
    pub fn check_lines_with(
        &self,
        text: &str,
        delimiter: char,
    ) -> Result<Vec<CheckedLine>, Rejection> {
        let mut checked = Vec::new();

        for (idx, line) in text.split(delimiter).enumerate() {
            let line_number = idx + 1;

            if line.is_empty() {
                checked.push(CheckedLine {
                    line: line_number,
                    canonical: String::new(),
                    diagnostic: String::new(),
                });
                continue;
            }

            let name = parser::parse(line).map_err(|e| {
                tracing::debug!(line = line_number, words = e.words, "rejecting batch");
                Rejection {
                    message: format!(
                        "Error on entry {}: \"{}\". Each name must be from {} to {} words.",
                        line_number, line, MIN_WORDS, MAX_WORDS
                    ),
                    line_number,
                }
            })?;

            let classification = self.classify(&name);
            tracing::debug!(line = line_number, name = %name, ?classification, "classified");

            checked.push(CheckedLine {
                line: line_number,
                diagnostic: classification.diagnostic(&name),
                canonical: name.to_string(),
            });
        }

        Ok(checked)
    }

    pub fn check_lines(&self, text: &str) -> Result<Vec<CheckedLine>, Rejection> {
        self.check_lines_with(text, self.delimiter)
    }

    /// Check a batch using an explicit delimiter.
    pub fn check_spelling_with(&self, text: &str, delimiter: char) -> SpellingResult {
        match self.check_lines_with(text, delimiter) {
            Ok(lines) => {
                let separator = delimiter.to_string();
                let canonical_lines = lines
                    .iter()
                    .map(|l| l.canonical.as_str())
                    .collect::<Vec<_>>()
                    .join(&separator);
                let marked_lines = lines
                    .iter()
                    .map(|l| l.diagnostic.as_str())
                    .collect::<Vec<_>>()
                    .join(&separator);

                SpellingResult::Checked {
                    canonical_lines,
                    marked_lines,
                }
            }
            Err(Rejection {
                message,
                line_number,
            }) => SpellingResult::Rejected {
                message,
                line_number,
            },
        }
    }

    /// Check a batch split on the validator's own delimiter.
    pub fn check_spelling(&self, text: &str) -> SpellingResult {
        self.check_spelling_with(text, self.delimiter)
    }

    /// Rebuild the roster and dictionary from `source`, persisting both.
    ///
    /// The new snapshot replaces the old one in a single assignment. If the
    /// source cannot be read, the previous snapshot stays in effect.
    pub fn reload_data(&mut self, source: &dyn RosterSource, store: &RosterStore) -> ReloadReport {
        let mut report = ReloadReport::default();

        let roster = match source.load_pairs() {
            Ok(names) => Roster::new(names),
            Err(e) => {
                tracing::warn!("roster source unreadable, keeping previous roster: {}", e);
                report.warnings.push(format!(
                    "Could not read the name pairings ({}). The previous roster is still in use.",
                    e
                ));
                return report;
            }
        };

        let vocabulary = store.vocabulary(&roster);
        let dictionary = match D::from_vocabulary(&vocabulary) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                tracing::warn!("failed to build dictionary, keeping previous data: {:#}", e);
                report
                    .warnings
                    .push(format!("Could not build the name dictionary: {:#}", e));
                return report;
            }
        };

        if let Err(e) = store.save_pairs(&roster) {
            tracing::warn!("failed to store name pairings: {}", e);
            report
                .warnings
                .push(format!("Could not save the name pairings: {}", e));
        }

        if let Err(e) = store.save_dictionary(&vocabulary) {
            tracing::warn!("failed to store dictionary: {}", e);
            report
                .warnings
                .push(format!("Could not save the name dictionary: {}", e));
        }

        report.reloaded = true;
        report.pairs = roster.len();
        report.words = roster.unique_words().len();
        self.snapshot = Snapshot { roster, dictionary };

        tracing::info!(pairs = report.pairs, words = report.words, "reloaded name database");

        report
    }
}
