//! Pipeline stages served by the LLM client.

use async_trait::async_trait;

use super::client::LlmClient;
use crate::nlp::{
    AbstractiveSummarizer, KeywordError, KeywordExtractor, QaError, QuestionAnswerer,
    SummarizeError,
};

#[async_trait]
impl AbstractiveSummarizer for LlmClient {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        do_sample: bool,
    ) -> Result<String, SummarizeError> {
        Ok(self
            .generate_summary(text, min_length, max_length, do_sample)
            .await?)
    }
}

#[async_trait]
impl QuestionAnswerer for LlmClient {
    async fn answer(&self, question: &str, context: &str) -> Result<String, QaError> {
        Ok(self.answer_question(question, context).await?)
    }
}

/// Keyword extraction through the LLM tagging prompt.
#[derive(Clone)]
pub struct LlmTagger {
    client: LlmClient,
    max_keywords: usize,
}

impl LlmTagger {
    pub fn new(client: LlmClient, max_keywords: usize) -> Self {
        Self {
            client,
            max_keywords,
        }
    }
}

#[async_trait]
impl KeywordExtractor for LlmTagger {
    async fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError> {
        Ok(self.client.generate_tags(text, self.max_keywords).await?)
    }
}
