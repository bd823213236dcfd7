pub mod source;
pub mod store;

pub use source::{CsvRosterSource, RosterSource};
pub use store::RosterStore;

use crate::name::Name;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write dictionary: {0:#}")]
    Dictionary(anyhow::Error),
}

/// The registered (first, last) pairs. Duplicates are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<Name>,
}

impl Roster {
    pub fn new(names: Vec<Name>) -> Self {
        Self { names }
    }

    /// Whether any registered pair is the same name.
    pub fn contains(&self, name: &Name) -> bool {
        self.names.iter().any(|n| n.is_same(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.names.iter()
    }

    pub fn unique_words(&self) -> Vec<String> {
        unique_words(self)
    }
}

impl FromIterator<Name> for Roster {
    fn from_iter<I: IntoIterator<Item = Name>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Every distinct first and last value in the roster, sorted ascending.
pub fn unique_words(roster: &Roster) -> Vec<String> {
    roster
        .iter()
        .flat_map(|n| [n.first(), n.last()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
