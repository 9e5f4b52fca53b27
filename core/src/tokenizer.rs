use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &["the", "is", "at", "which", "on", "in", "and", "a", "to", "ah"];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Tokenize text into normalized terms: split on whitespace, trim leading
/// and trailing punctuation, lowercase, drop empties and stop words.
///
/// Positions are indices into the returned stream, so callers that need
/// 0-based token offsets enumerate the result.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .filter(|word| !is_stopword(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The cat, sat!");
        assert_eq!(t, vec!["cat", "sat"]);
    }

    #[test]
    fn punctuation_only_tokens_are_dropped() {
        let t = tokenize("--- cat ... ---");
        assert_eq!(t, vec!["cat"]);
    }
}
