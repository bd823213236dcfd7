use super::{Roster, RosterError};
use crate::checker::dictionary::{FstDictionary, WordDictionary};
use crate::name::Name;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk home of the encoded roster and the compiled name dictionary.
#[derive(Debug, Clone)]
pub struct RosterStore {
    pairs_path: PathBuf,
    dictionary_path: PathBuf,
    base_vocabulary: Option<PathBuf>,
}

impl RosterStore {
    pub fn new(pairs_path: impl Into<PathBuf>, dictionary_path: impl Into<PathBuf>) -> Self {
        Self {
            pairs_path: pairs_path.into(),
            dictionary_path: dictionary_path.into(),
            base_vocabulary: None,
        }
    }

    /// Words every rebuilt dictionary starts from, one per line.
    pub fn with_base_vocabulary(mut self, path: Option<PathBuf>) -> Self {
        self.base_vocabulary = path;
        self
    }

    pub fn pairs_path(&self) -> &Path {
        &self.pairs_path
    }

    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    /// Write one encoded name per line.
    pub fn save_pairs(&self, roster: &Roster) -> Result<(), RosterError> {
        let contents = roster
            .iter()
            .map(Name::to_encoded)
            .collect::<Vec<_>>()
            .join("\n");

        ensure_parent(&self.pairs_path)?;
        fs::write(&self.pairs_path, contents).map_err(|source| RosterError::Io {
            path: self.pairs_path.clone(),
            source,
        })
    }

    /// Read the stored roster. Undecodable lines are skipped with a warning.
    pub fn load_pairs(&self) -> Result<Roster, RosterError> {
        let contents = fs::read_to_string(&self.pairs_path).map_err(|source| RosterError::Io {
            path: self.pairs_path.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Name::decode(line) {
                Ok(name) => names.push(name),
                Err(e) => tracing::warn!(
                    path = %self.pairs_path.display(),
                    line = idx + 1,
                    "skipping stored pair: {}",
                    e
                ),
            }
        }

        Ok(Roster::new(names))
    }

    /// The stored roster, or an empty one when nothing has been stored yet.
    pub fn load_pairs_or_default(&self) -> Roster {
        match self.load_pairs() {
            Ok(roster) => roster,
            Err(e) => {
                tracing::warn!(
                    "No name pairings have been loaded ({}). Reload the name database first.",
                    e
                );
                Roster::default()
            }
        }
    }

    /// Base vocabulary words; blank lines and `#` comments are ignored.
    pub fn base_words(&self) -> Result<Vec<String>, RosterError> {
        let Some(path) = &self.base_vocabulary else {
            return Ok(Vec::new());
        };

        let contents = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// Base words plus the roster's unique words.
    pub fn vocabulary(&self, roster: &Roster) -> Vec<String> {
        let mut words = self.base_words().unwrap_or_else(|e| {
            tracing::warn!("ignoring base vocabulary: {}", e);
            Vec::new()
        });
        words.extend(roster.unique_words());
        words
    }

    pub fn save_dictionary(&self, vocabulary: &[String]) -> Result<(), RosterError> {
        FstDictionary::build_from_words(vocabulary, &self.dictionary_path)
            .map_err(RosterError::Dictionary)
    }

    /// Load the compiled dictionary, falling back to one built in memory
    /// from the base vocabulary when no dictionary has been written yet.
    pub fn load_dictionary(&self) -> Result<FstDictionary> {
        if self.dictionary_path.exists() {
            return FstDictionary::load_from_path(&self.dictionary_path);
        }

        tracing::info!(
            path = %self.dictionary_path.display(),
            "no compiled dictionary yet, using base vocabulary"
        );
        FstDictionary::from_vocabulary(&self.vocabulary(&Roster::default()))
    }
}

fn ensure_parent(path: &Path) -> Result<(), RosterError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| RosterError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
