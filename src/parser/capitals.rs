use unicode_segmentation::UnicodeSegmentation;

/// Capitalize the right letters of a name string.
///
/// The string is split at its first space (or, without spaces, its first
/// hyphen) and both halves are fixed up recursively, so every word and every
/// hyphenated part ends up with an upper-case first letter:
///
/// - `ana maria` -> `Ana Maria`
/// - `st. pierre-marx` -> `St. Pierre-Marx`
/// - `matt` -> `Matt`
pub fn fixup_capitals(s: &str) -> String {
    let split = s
        .split_once(' ')
        .map(|parts| (' ', parts))
        .or_else(|| s.split_once('-').map(|parts| ('-', parts)));

    match split {
        Some((delim, (head, tail))) => {
            format!("{}{}{}", fixup_capitals(head), delim, fixup_capitals(tail))
        }
        None => capitalize_word(s),
    }
}

/// Upper-case the first letter, lower-case the rest.
///
/// A first letter whose upper case is more than one character ("ß", "ﬁ")
/// is left alone so the result keeps its length and a second pass is a no-op.
fn capitalize_word(word: &str) -> String {
    let mut graphemes = word.graphemes(true);
    let Some(first) = graphemes.next() else {
        return String::new();
    };

    let mut capitalized = String::with_capacity(word.len());
    let mut chars = first.chars();
    if let Some(c) = chars.next() {
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => capitalized.push(u),
            _ => capitalized.push(c),
        }
    }
    capitalized.push_str(chars.as_str());
    capitalized.push_str(&graphemes.as_str().to_lowercase());
    capitalized
}
