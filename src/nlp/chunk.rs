//! Rule-based noun-phrase chunking.
//!
//! Without a part-of-speech tagger, a chunk is approximated as an optional
//! determiner followed by a run of content words. Stopwords, punctuation,
//! and past-tense or gerund forms after a noun end the run.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stopword;
use super::tokenize::{is_word, sentences};

/// Finds noun-phrase chunks in text.
pub trait NounChunker: Send + Sync {
    /// Noun-phrase chunks in document order.
    fn noun_chunks(&self, text: &str) -> Vec<String>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their",
];

/// Heuristic chunker over stopwords and word shape.
#[derive(Debug, Clone, Default)]
pub struct RuleNounChunker;

impl RuleNounChunker {
    pub fn new() -> Self {
        Self
    }
}

impl NounChunker for RuleNounChunker {
    fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        for sentence in sentences(text) {
            chunk_sentence(&sentence, &mut chunks);
        }
        chunks
    }
}

fn chunk_sentence(sentence: &str, chunks: &mut Vec<String>) {
    let mut determiner: Option<&str> = None;
    let mut current: Vec<&str> = Vec::new();

    for token in sentence.split_word_bounds() {
        if token.trim().is_empty() {
            continue;
        }

        let lower = token.to_lowercase();
        if DETERMINERS.contains(&lower.as_str()) {
            flush(&mut determiner, &mut current, chunks);
            determiner = Some(token);
            continue;
        }

        let content = is_word(token) && !is_stopword(token);
        let ends_run = !current.is_empty() && is_verb_form(&lower);
        if content && !ends_run {
            current.push(token);
            continue;
        }

        flush(&mut determiner, &mut current, chunks);
    }

    flush(&mut determiner, &mut current, chunks);
}

fn flush<'a>(determiner: &mut Option<&'a str>, current: &mut Vec<&'a str>, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        let mut parts = Vec::with_capacity(current.len() + 1);
        if let Some(det) = determiner.take() {
            parts.push(det);
        }
        parts.extend(current.drain(..));
        chunks.push(parts.join(" "));
    }
    *determiner = None;
}

/// Past-tense and gerund shapes ("approved", "running").
fn is_verb_form(lower: &str) -> bool {
    (lower.len() > 4 && lower.ends_with("ed")) || (lower.len() > 5 && lower.ends_with("ing"))
}
