pub mod capitals;

pub use capitals::fixup_capitals;

use crate::name::Name;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const MIN_WORDS: usize = 2;
pub const MAX_WORDS: usize = 4;

lazy_static! {
    // Two or more spaces between words
    static ref SPACE_RUN: Regex = Regex::new(" {2,}").unwrap();
}

/// A line that could not be turned into a [`Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("name must be from 2 to 4 words, found {words}")]
pub struct NotParsed {
    pub words: usize,
}

/// Parse a line of 2 to 4 words into a canonical [`Name`].
///
/// Word grouping:
/// - `Matthew Spooner`: one given name, one family name
/// - `Ana St. Pierre`: a dotted middle word starts a two-word family name
/// - `Ana Maria Pierre`: otherwise the middle word joins the given name
/// - `Ana Maria St. Pierre`: two and two
///
/// Character content is not validated.
pub fn parse(line: &str) -> Result<Name, NotParsed> {
    let collapsed = collapse_whitespace(line);
    let parts: Vec<&str> = collapsed.split(' ').collect();

    let (first, last) = match parts.as_slice() {
        [first, last] => (first.to_string(), last.to_string()),
        [first, middle, last] if middle.contains('.') => {
            (first.to_string(), format!("{} {}", middle, last))
        }
        [first, middle, last] => (format!("{} {}", first, middle), last.to_string()),
        [first, second, third, fourth] => {
            (format!("{} {}", first, second), format!("{} {}", third, fourth))
        }
        _ => {
            return Err(NotParsed {
                words: parts.len(),
            })
        }
    };

    Ok(Name::new(fixup_capitals(&first), fixup_capitals(&last)))
}

/// Trim the line and squeeze interior runs of spaces down to one.
pub fn collapse_whitespace(line: &str) -> String {
    SPACE_RUN.replace_all(line.trim(), " ").into_owned()
}
