//! Keyword extraction.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stopword;
use super::tokenize::is_word;
use crate::llm::LlmError;

pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Errors from keyword extraction.
#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("keyword backend failed: {0}")]
    Backend(#[from] LlmError),
}

/// Keyword extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordBackend {
    /// Local RAKE scorer.
    #[default]
    Rake,
    /// LLM tagging prompt.
    Llm,
}

impl FromStr for KeywordBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rake" => Ok(Self::Rake),
            "llm" => Ok(Self::Llm),
            other => Err(format!("unknown keyword backend: {}", other)),
        }
    }
}

/// Pulls an ordered list of keywords out of text.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError>;
}

/// Rapid automatic keyword extraction.
///
/// Candidate phrases are the runs of words between stopwords and
/// punctuation. Each word scores degree over frequency; a phrase scores the
/// sum of its words.
#[derive(Debug, Clone)]
pub struct RakeExtractor {
    max_keywords: usize,
}

impl Default for RakeExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS)
    }
}

impl RakeExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self { max_keywords }
    }

    /// Ranked keyword phrases, best first.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let phrases = candidate_phrases(text);

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            for word in phrase {
                *frequency.entry(word.as_str()).or_default() += 1.0;
                *degree.entry(word.as_str()).or_default() += phrase.len() as f64;
            }
        }

        let mut scored: Vec<(String, f64, usize)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (position, phrase) in phrases.iter().enumerate() {
            let key = phrase.join(" ");
            if seen.contains_key(&key) {
                continue;
            }
            let score = phrase
                .iter()
                .map(|w| degree[w.as_str()] / frequency[w.as_str()])
                .sum();
            seen.insert(key.clone(), scored.len());
            scored.push((key, score, position));
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));
        scored
            .into_iter()
            .take(self.max_keywords)
            .map(|(phrase, _, _)| phrase)
            .collect()
    }
}

#[async_trait]
impl KeywordExtractor for RakeExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError> {
        Ok(self.keywords(text))
    }
}

/// Lowercased word runs delimited by stopwords and punctuation.
fn candidate_phrases(text: &str) -> Vec<Vec<String>> {
    let mut phrases = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for token in text.split_word_bounds() {
        if token.trim().is_empty() {
            continue;
        }
        if is_word(token) && !is_stopword(token) && !is_number(token) {
            current.push(token.to_lowercase());
        } else if !current.is_empty() {
            phrases.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

fn is_number(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}
