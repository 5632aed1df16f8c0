//! Sentence and word tokenization over Unicode text segmentation.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stopword;

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Split text into word and punctuation tokens, dropping whitespace.
pub fn words(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|w| !w.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Lowercased words that carry meaning: no punctuation, no stopwords.
pub fn content_words(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|w| !is_stopword(w))
        .map(str::to_lowercase)
        .collect()
}

/// Whether a token is a word rather than punctuation or symbols.
pub fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences() {
        assert_eq!(sentences("A. B. C."), vec!["A.", "B.", "C."]);
        assert_eq!(
            sentences("Is it raining? Yes!  It is.\n"),
            vec!["Is it raining?", "Yes!", "It is."]
        );
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_words_keep_punctuation() {
        assert_eq!(words("Hello, world!"), vec!["Hello", ",", "world", "!"]);
    }

    #[test]
    fn test_content_words() {
        assert_eq!(
            content_words("The owner of the value drops it."),
            vec!["owner", "value", "drops"]
        );
    }
}
