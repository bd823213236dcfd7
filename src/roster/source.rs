use super::RosterError;
use crate::name::Name;
use std::path::{Path, PathBuf};

/// Supplies the raw registered pairs a roster is rebuilt from.
pub trait RosterSource {
    fn load_pairs(&self) -> Result<Vec<Name>, RosterError>;
}

/// Reads pairs from a comma-separated export of the registration sheet.
///
/// Rows and columns are 1-based like spreadsheet cells: the defaults read
/// first names from column B and last names from column C starting at row 3.
/// Reading stops at the first row with a missing or blank name cell.
#[derive(Debug, Clone)]
pub struct CsvRosterSource {
    path: PathBuf,
    first_row: usize,
    first_name_column: usize,
    last_name_column: usize,
}

impl CsvRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            first_row: 3,
            first_name_column: 2,
            last_name_column: 3,
        }
    }

    pub fn with_layout(
        mut self,
        first_row: usize,
        first_name_column: usize,
        last_name_column: usize,
    ) -> Self {
        self.first_row = first_row.max(1);
        self.first_name_column = first_name_column.max(1);
        self.last_name_column = last_name_column.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterSource for CsvRosterSource {
    fn load_pairs(&self) -> Result<Vec<Name>, RosterError> {
        let source_error = |source| RosterError::Source {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(source_error)?;

        let mut names = Vec::new();

        for record in reader.records().skip(self.first_row - 1) {
            let record = record.map_err(source_error)?;

            let cell = |column: usize| {
                record
                    .get(column - 1)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            };

            match (cell(self.first_name_column), cell(self.last_name_column)) {
                (Some(first), Some(last)) => names.push(Name::new(first, last)),
                _ => break,
            }
        }

        tracing::debug!(path = %self.path.display(), count = names.len(), "read roster source");

        Ok(names)
    }
}
