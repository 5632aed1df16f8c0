//! Two-stage summarization: extractive condensation, then abstractive rewrite.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use super::codec::{CodecError, TokenCodec};
use super::textrank::ExtractiveSummarizer;
use crate::llm::LlmError;

/// Returned when the extractive stage selects nothing.
pub const SUMMARY_UNAVAILABLE: &str =
    "Summary could not be generated. The text might be too short or uninformative.";

/// Site chrome stripped from text when preprocessing is requested.
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "sales@w3schools.com",
    "help@w3schools.com",
    "Contact us about W3Schools Academy",
    "Join our newsletter",
    "Training After completing this course",
    "solutions architects",
    "Technical professionals",
];

pub const DEFAULT_MAX_INPUT_TOKENS: usize = 1024;
pub const DEFAULT_MIN_LENGTH: usize = 150;
pub const DEFAULT_MAX_LENGTH: usize = 350;

/// Errors from summarization.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("abstractive summarizer failed: {0}")]
    Backend(#[from] LlmError),
}

/// Generates a paraphrased summary of text.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    /// Summarize `text` into between `min_length` and `max_length` tokens.
    /// With `do_sample` off, decoding must be deterministic.
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        do_sample: bool,
    ) -> Result<String, SummarizeError>;
}

/// Length bounds and boilerplate list for [`Summarizer`].
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub max_input_tokens: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub boilerplate: Vec<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            boilerplate: DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Remove every occurrence of each phrase.
pub fn strip_boilerplate(text: &str, phrases: &[String]) -> String {
    phrases
        .iter()
        .filter(|p| !p.is_empty())
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase.as_str(), ""))
}

/// Extractive-then-abstractive summarization pipeline.
#[derive(Clone)]
pub struct Summarizer {
    extractive: Arc<dyn ExtractiveSummarizer>,
    codec: Arc<dyn TokenCodec>,
    abstractive: Arc<dyn AbstractiveSummarizer>,
    options: SummaryOptions,
}

impl Summarizer {
    pub fn new(
        extractive: Arc<dyn ExtractiveSummarizer>,
        codec: Arc<dyn TokenCodec>,
        abstractive: Arc<dyn AbstractiveSummarizer>,
        options: SummaryOptions,
    ) -> Self {
        Self {
            extractive,
            codec,
            abstractive,
            options,
        }
    }

    /// Summarize `text`, stripping known boilerplate first when `preprocess`
    /// is set.
    ///
    /// Input to the abstractive stage is cut to `max_input_tokens`; anything
    /// past that boundary is dropped.
    pub async fn summarize(&self, text: &str, preprocess: bool) -> Result<String, SummarizeError> {
        let text = if preprocess {
            strip_boilerplate(text, &self.options.boilerplate)
        } else {
            text.to_string()
        };

        let extractive = self.extractive.summarize(&text);
        if extractive.trim().is_empty() {
            info!("Extractive stage selected no sentences");
            return Ok(SUMMARY_UNAVAILABLE.to_string());
        }

        let truncated = self
            .codec
            .truncate(&extractive, self.options.max_input_tokens)?;
        debug!(
            "Extractive summary {} chars, {} after truncation",
            extractive.len(),
            truncated.len()
        );

        self.abstractive
            .summarize(
                &truncated,
                self.options.min_length,
                self.options.max_length,
                false,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_boilerplate() {
        let phrases: Vec<String> = DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect();
        let text = "Learn Rust. Join our newsletter today. Mail sales@w3schools.com now.";
        assert_eq!(
            strip_boilerplate(text, &phrases),
            "Learn Rust.  today. Mail  now."
        );
    }

    #[test]
    fn test_strip_boilerplate_is_case_sensitive() {
        let phrases = vec!["Join our newsletter".to_string()];
        assert_eq!(
            strip_boilerplate("join our newsletter", &phrases),
            "join our newsletter"
        );
    }

    #[test]
    fn test_default_options() {
        let options = SummaryOptions::default();
        assert_eq!(options.max_input_tokens, 1024);
        assert_eq!(options.min_length, 150);
        assert_eq!(options.max_length, 350);
        assert_eq!(options.boilerplate.len(), 7);
    }
}
