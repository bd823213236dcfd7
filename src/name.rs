use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;
use thiserror::Error;

/// Separates the two encoded halves. Never produced by the standard base64 alphabet.
const ENCODED_SEPARATOR: char = '%';

/// A first and last name pairing in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    first: String,
    last: String,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("encoded name has no '%' separator")]
    MissingSeparator,
    #[error("invalid base64 in encoded name: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("encoded name is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Name {
    /// Build a name from strings that are already trusted, such as roster rows.
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Given name, possibly two words ("Ana Maria").
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Family name, possibly compound ("St. Pierre-Quanto").
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Case-sensitive field-wise comparison of the canonical strings.
    pub fn is_same(&self, other: &Name) -> bool {
        self.first == other.first && self.last == other.last
    }

    /// Opaque transport form: `base64(first)%base64(last)`.
    pub fn to_encoded(&self) -> String {
        format!(
            "{}{}{}",
            STANDARD.encode(self.first.as_bytes()),
            ENCODED_SEPARATOR,
            STANDARD.encode(self.last.as_bytes())
        )
    }

    /// Reverse of [`Name::to_encoded`].
    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        let (first, last) = encoded
            .split_once(ENCODED_SEPARATOR)
            .ok_or(DecodeError::MissingSeparator)?;

        Ok(Self {
            first: String::from_utf8(STANDARD.decode(first)?)?,
            last: String::from_utf8(STANDARD.decode(last)?)?,
        })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}
