use anyhow::{Context, Result};
use fst::{Set, SetBuilder, Streamer};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

/// The word-level spelling capability the validator is built on.
pub trait WordDictionary: Sized {
    /// Is this word in the vocabulary?
    fn known(&self, word: &str) -> bool;

    /// Up to `limit` correction candidates, best first.
    fn suggest(&self, word: &str, limit: usize) -> Vec<String>;

    /// Build a fresh dictionary over the given vocabulary.
    fn from_vocabulary(words: &[String]) -> Result<Self>;
}

/// Production dictionary backed by an FST set of lower-cased words.
pub struct FstDictionary {
    set: Set<Vec<u8>>,
}

impl FstDictionary {
    /// Load dictionary from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;

        let reader = BufReader::new(file);
        let set = Set::new(reader.bytes().collect::<Result<Vec<_>, _>>()?)
            .context("Failed to parse dictionary")?;

        Ok(Self { set })
    }

    /// Check if word exists in dictionary, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.to_lowercase().as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Get all words in dictionary.
    ///
    /// Name vocabularies are small, so the suggestion scan walks the whole set.
    pub fn all_words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.set.len());
        let mut stream = self.set.stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                words.push(word);
            }
        }

        words
    }

    /// Build dictionary from word list and write it to `output_path`
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create dictionary directory: {}", parent.display())
            })?;
        }

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in normalized(words) {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }
}

impl WordDictionary for FstDictionary {
    fn known(&self, word: &str) -> bool {
        self.contains(word)
    }

    fn suggest(&self, word: &str, limit: usize) -> Vec<String> {
        super::suggestions::generate(&word.to_lowercase(), self, limit)
    }

    fn from_vocabulary(words: &[String]) -> Result<Self> {
        let set = Set::from_iter(normalized(words)).context("Failed to build dictionary")?;
        Ok(Self { set })
    }
}

/// Lower-cased, sorted, de-duplicated, blanks dropped. FST insertion order.
fn normalized(words: &[String]) -> BTreeSet<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Deterministic dictionary with a fixed vocabulary and fixed suggestions.
///
/// Matching is exact and case-sensitive. Useful wherever a reproducible
/// backend is needed without building an FST.
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionary {
    words: HashSet<String>,
    suggestions: HashMap<String, Vec<String>>,
}

impl MemoryDictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            suggestions: HashMap::new(),
        }
    }

    /// Register the candidates returned for `word`, best first.
    pub fn with_suggestions<S: Into<String>>(mut self, word: &str, candidates: Vec<S>) -> Self {
        self.suggestions.insert(
            word.to_string(),
            candidates.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl WordDictionary for MemoryDictionary {
    fn known(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn suggest(&self, word: &str, limit: usize) -> Vec<String> {
        self.suggestions
            .get(word)
            .map(|candidates| candidates.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn from_vocabulary(words: &[String]) -> Result<Self> {
        Ok(Self::new(words.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("nested").join("names.dict");

        FstDictionary::build_from_words(&words(&["Ana", "Pierre", "St. Pierre"]), &dict_path)
            .unwrap();

        let dict = FstDictionary::load_from_path(&dict_path).unwrap();
        assert!(dict.known("Ana"));
        assert!(dict.known("ana"));
        assert!(dict.known("St. Pierre"));
        assert!(!dict.known("Matthew"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_from_vocabulary_dedups_case_variants() {
        let dict = FstDictionary::from_vocabulary(&words(&["Ana", "ana", " ", "Lee"])).unwrap();
        assert_eq!(dict.all_words(), vec!["ana", "lee"]);
    }

    #[test]
    fn test_fst_suggest_is_capped() {
        let dict =
            FstDictionary::from_vocabulary(&words(&["Pierre", "Pierce", "Pierrot", "Piers"]))
                .unwrap();
        let suggestions = dict.suggest("Pierrre", 2);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0], "pierre");
    }

    #[test]
    fn test_memory_dictionary() {
        let dict = MemoryDictionary::new(["Ana", "Pierre"])
            .with_suggestions("Pierrre", vec!["pierre", "pierce", "piers"]);

        assert!(dict.known("Ana"));
        assert!(!dict.known("ana"));
        assert_eq!(dict.suggest("Pierrre", 2), vec!["pierre", "pierce"]);
        assert!(dict.suggest("Zed", 2).is_empty());
    }
}
