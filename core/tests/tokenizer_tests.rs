use core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_strips_punctuation() {
    let toks = tokenize("Hello, World! (really)");
    assert_eq!(toks, vec!["hello", "world", "really"]);
}

#[test]
fn it_filters_stopwords() {
    let toks = tokenize("the cat is at which on in and a to ah sat");
    assert_eq!(toks, vec!["cat", "sat"]);
}

#[test]
fn it_preserves_order_and_duplicates() {
    let toks = tokenize("cat sat cat");
    assert_eq!(toks, vec!["cat", "sat", "cat"]);
}

#[test]
fn inner_punctuation_is_kept() {
    // Only leading and trailing punctuation is trimmed.
    let toks = tokenize("don't stop-word.");
    assert_eq!(toks, vec!["don't", "stop-word"]);
}

#[test]
fn empty_input_yields_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \t\n").is_empty());
}
