use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// CSV export of the registration sheet used by `reload`.
    #[serde(default = "default_roster_input")]
    pub roster_input: PathBuf,

    #[serde(default = "default_first_row")]
    pub first_row: usize,

    #[serde(default = "default_first_name_column")]
    pub first_name_column: usize,

    #[serde(default = "default_last_name_column")]
    pub last_name_column: usize,

    #[serde(default)]
    pub pairings_file: Option<PathBuf>,

    #[serde(default)]
    pub dictionary_file: Option<PathBuf>,

    /// Extra words every rebuilt dictionary starts with.
    #[serde(default)]
    pub base_vocabulary: Option<PathBuf>,
}

fn default_delimiter() -> char {
    '\n'
}

fn default_max_suggestions() -> usize {
    crate::checker::DEFAULT_MAX_SUGGESTIONS
}

fn default_roster_input() -> PathBuf {
    PathBuf::from("pairings.csv")
}

fn default_first_row() -> usize {
    3
}

fn default_first_name_column() -> usize {
    2
}

fn default_last_name_column() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            max_suggestions: default_max_suggestions(),
            roster_input: default_roster_input(),
            first_row: default_first_row(),
            first_name_column: default_first_name_column(),
            last_name_column: default_last_name_column(),
            pairings_file: None,
            dictionary_file: None,
            base_vocabulary: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(delimiter: Option<char>, roster_input: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".rosterchk.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(delimiter) = delimiter {
            config.delimiter = delimiter;
        }
        if let Some(input) = roster_input {
            config.roster_input = input;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.delimiter != default_delimiter() {
            self.delimiter = other.delimiter;
        }
        if other.max_suggestions != default_max_suggestions() {
            self.max_suggestions = other.max_suggestions;
        }
        if other.roster_input != default_roster_input() {
            self.roster_input = other.roster_input;
        }
        if other.first_row != default_first_row() {
            self.first_row = other.first_row;
        }
        if other.first_name_column != default_first_name_column() {
            self.first_name_column = other.first_name_column;
        }
        if other.last_name_column != default_last_name_column() {
            self.last_name_column = other.last_name_column;
        }
        if other.pairings_file.is_some() {
            self.pairings_file = other.pairings_file;
        }
        if other.dictionary_file.is_some() {
            self.dictionary_file = other.dictionary_file;
        }
        if other.base_vocabulary.is_some() {
            self.base_vocabulary = other.base_vocabulary;
        }
        self
    }

    /// Where the encoded roster lives.
    pub fn pairings_path(&self) -> Result<PathBuf> {
        match &self.pairings_file {
            Some(path) => Ok(path.clone()),
            None => Self::data_dir()
                .map(|dir| dir.join("storedPairings.nms"))
                .context("Failed to get data directory"),
        }
    }

    /// Where the compiled name dictionary lives.
    pub fn dictionary_path(&self) -> Result<PathBuf> {
        match &self.dictionary_file {
            Some(path) => Ok(path.clone()),
            None => Self::data_dir()
                .map(|dir| dir.join("validNames.dict"))
                .context("Failed to get data directory"),
        }
    }

    pub fn store(&self) -> Result<crate::roster::RosterStore> {
        Ok(
            crate::roster::RosterStore::new(self.pairings_path()?, self.dictionary_path()?)
                .with_base_vocabulary(self.base_vocabulary.clone()),
        )
    }

    pub fn roster_source(&self) -> crate::roster::CsvRosterSource {
        crate::roster::CsvRosterSource::new(&self.roster_input).with_layout(
            self.first_row,
            self.first_name_column,
            self.last_name_column,
        )
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rosterchk").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rosterchk").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
