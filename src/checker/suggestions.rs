use crate::checker::dictionary::FstDictionary;

/// Furthest a vocabulary word may be from the input and still be offered.
const MAX_DISTANCE: usize = 2;

/// Generate spelling suggestions for a lower-cased word, best first.
pub fn generate(word: &str, dictionary: &FstDictionary, max_suggestions: usize) -> Vec<String> {
    let mut suggestions = Vec::new();
    if max_suggestions == 0 || word.is_empty() {
        return suggestions;
    }

    // 1. Single edits and common sound-alike swaps that land on a known word
    for transform in generate_transformations(word) {
        if transform != word && dictionary.contains(&transform) && !suggestions.contains(&transform)
        {
            suggestions.push(transform);
            if suggestions.len() >= max_suggestions {
                return suggestions;
            }
        }
    }

    // 2. Nearest remaining words by edit distance, ties alphabetical
    let mut candidates: Vec<(usize, String)> = dictionary
        .all_words()
        .into_iter()
        .filter(|w| w != word && !suggestions.contains(w))
        .filter(|w| {
            let len_diff = w.chars().count().abs_diff(word.chars().count());
            len_diff <= MAX_DISTANCE
        })
        .filter_map(|w| {
            let dist = edit_distance(word, &w);
            (dist <= MAX_DISTANCE).then_some((dist, w))
        })
        .collect();

    candidates.sort();

    suggestions.extend(candidates.into_iter().map(|(_, w)| w));
    suggestions.truncate(max_suggestions);
    suggestions
}

/// Calculate Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *item = j;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };

            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1, // deletion
                    matrix[i + 1][j] + 1, // insertion
                ),
                matrix[i][j] + cost, // substitution
            );
        }
    }

    matrix[a_len][b_len]
}

/// Generate common transformations of a word
fn generate_transformations(word: &str) -> Vec<String> {
    let mut transformations = Vec::new();
    let chars: Vec<char> = word.chars().collect();

    // Deletions (doubled letters are the usual name typo)
    for i in 0..chars.len() {
        let mut new_word = chars.clone();
        new_word.remove(i);
        transformations.push(new_word.iter().collect());
    }

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        let mut new_word = chars.clone();
        new_word.swap(i, i + 1);
        transformations.push(new_word.iter().collect());
    }

    // Sound-alike letters frequently confused in names
    let phonetic_replacements = [
        ('a', 'e'),
        ('e', 'a'),
        ('i', 'y'),
        ('y', 'i'),
        ('c', 'k'),
        ('k', 'c'),
        ('f', 'v'),
        ('s', 'z'),
        ('z', 's'),
        ('t', 'd'),
        ('m', 'n'),
        ('n', 'm'),
    ];

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in &phonetic_replacements {
            if ch == from {
                let mut new_word = chars.clone();
                new_word[i] = to;
                transformations.push(new_word.iter().collect());
            }
        }
    }

    transformations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::WordDictionary;

    fn dictionary(words: &[&str]) -> FstDictionary {
        let words: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        FstDictionary::from_vocabulary(&words).unwrap()
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("pierre", "pierre"), 0);
        assert_eq!(edit_distance("pierrre", "pierre"), 1);
        assert_eq!(edit_distance("katie", "katy"), 2);
        assert_eq!(edit_distance("", "ana"), 3);
    }

    #[test]
    fn test_transformations() {
        let transforms = generate_transformations("jhon");
        assert!(transforms.contains(&"jon".to_string())); // deletion
        assert!(transforms.contains(&"john".to_string())); // transposition
        assert!(generate_transformations("kate").contains(&"cate".to_string()));
    }

    #[test]
    fn test_transformation_hits_rank_first() {
        let dict = dictionary(&["john", "joan", "jon"]);
        let suggestions = generate("jhon", &dict, 3);
        assert_eq!(suggestions[0], "jon");
        assert_eq!(suggestions[1], "john");
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn test_far_words_are_not_suggested() {
        let dict = dictionary(&["spooner", "ana"]);
        assert!(generate("maxwell", &dict, 2).is_empty());
    }

    #[test]
    fn test_respects_limit() {
        let dict = dictionary(&["lee", "lea", "leo", "lei"]);
        assert_eq!(generate("lex", &dict, 2), vec!["lea", "lee"]);
        assert!(generate("lex", &dict, 0).is_empty());
    }
}
