//! Query matching over a single text field.
//!
//! All offsets are character (code point) positions, never byte positions.

use crate::error::SearchError;
use regex::{Regex, RegexBuilder};

/// A compiled query, either a plain substring or a wildcard pattern.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive substring. Holds the case-folded query characters.
    Plain(Vec<char>),
    /// Case-insensitive pattern tested against each whitespace-separated word.
    Wildcard(Regex),
}

impl Matcher {
    /// Compile a trimmed, non-empty query.
    ///
    /// A query containing `*` or `?` becomes a wildcard pattern where `*`
    /// matches any run of characters and `?` exactly one.
    pub fn compile(query: &str) -> Result<Self, SearchError> {
        if query.contains(['*', '?']) {
            wildcard_regex(query).map(Self::Wildcard)
        } else {
            Ok(Self::Plain(fold(query)))
        }
    }

    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// Starting offsets of every match in `text`, in ascending order.
    pub fn find_all(&self, text: &str) -> Vec<usize> {
        match self {
            Self::Plain(needle) => find_plain(needle, text),
            Self::Wildcard(regex) => find_words(regex, text),
        }
    }
}

/// Lowercase character by character, keeping one output char per input char
/// so offsets in the folded text line up with the input.
fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Non-overlapping occurrences of `needle`, scanned left to right.
fn find_plain(needle: &[char], text: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack = fold(text);
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos + needle.len() <= haystack.len() {
        if haystack[pos..pos + needle.len()] == *needle {
            matches.push(pos);
            pos += needle.len();
        } else {
            pos += 1;
        }
    }

    matches
}

/// Offsets of the words of `text` that the pattern matches.
///
/// Testing word by word bounds the work per test to a single word.
fn find_words(regex: &Regex, text: &str) -> Vec<usize> {
    let mut matches = Vec::new();
    let mut word_start: Option<(usize, usize)> = None;
    let mut char_pos = 0;

    for (byte_pos, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((start_byte, start_char)) = word_start.take()
                && regex.is_match(&text[start_byte..byte_pos])
            {
                matches.push(start_char);
            }
        } else if word_start.is_none() {
            word_start = Some((byte_pos, char_pos));
        }
        char_pos += 1;
    }

    if let Some((start_byte, start_char)) = word_start
        && regex.is_match(&text[start_byte..])
    {
        matches.push(start_char);
    }

    matches
}

/// Escape the query, then turn the escaped `*` and `?` into `.*` and `.`.
///
/// The escaped pattern only holds literals, `.` and `.*`; building it can
/// only fail on the regex size limit.
fn wildcard_regex(query: &str) -> Result<Regex, SearchError> {
    let pattern = regex::escape(query)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SearchError::InvalidQuery(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("page", "First page", vec![6])]
    #[case("PAGE", "page Page pAgE", vec![0, 5, 10])]
    #[case("aa", "aaaa", vec![0, 2])]
    #[case("aa", "aaa", vec![0])]
    #[case("xyz", "no match here", vec![])]
    #[case("é", "café é", vec![3, 5])]
    #[case("naïve", "Très NAÏVE", vec![5])]
    fn test_plain_offsets(#[case] query: &str, #[case] text: &str, #[case] expected: Vec<usize>) {
        let matcher = Matcher::compile(query).unwrap();
        check!(!matcher.is_wildcard());
        check!(matcher.find_all(text) == expected);
    }

    #[test]
    fn test_plain_offsets_are_code_points() {
        // Each CJK character is three bytes but one offset step
        let matcher = Matcher::compile("検索").unwrap();
        check!(matcher.find_all("文書の検索と検索") == vec![3, 6]);
    }

    #[rstest]
    #[case("pag*", "First page", vec![6])]
    #[case("pag*", "page pages paging pa", vec![0, 5, 11])]
    #[case("p?ge", "page pge paage PAGE", vec![0, 15])]
    #[case("*", "one two", vec![0, 4])]
    #[case("Conf*", "the config  and CONFIGURATION", vec![4, 16])]
    fn test_wildcard_offsets(
        #[case] query: &str,
        #[case] text: &str,
        #[case] expected: Vec<usize>,
    ) {
        let matcher = Matcher::compile(query).unwrap();
        check!(matcher.is_wildcard());
        check!(matcher.find_all(text) == expected);
    }

    #[test]
    fn test_wildcard_escapes_metacharacters() {
        let matcher = Matcher::compile("a.b*").unwrap();
        check!(matcher.find_all("a.bc axbc") == vec![0]);

        let matcher = Matcher::compile("(x)?").unwrap();
        check!(matcher.find_all("(x)1 x1") == vec![0]);
    }

    #[test]
    fn test_wildcard_word_offsets_with_multibyte() {
        let matcher = Matcher::compile("d?c*").unwrap();
        check!(matcher.find_all("über docs dócs") == vec![5, 10]);
    }

    #[test]
    fn test_empty_text() {
        check!(Matcher::compile("page").unwrap().find_all("").is_empty());
        check!(Matcher::compile("pa*").unwrap().find_all("   ").is_empty());
    }
}
