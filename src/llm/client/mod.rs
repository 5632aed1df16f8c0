//! LLM client for summaries, keyword tags, and question answering.
//!
//! Supports the Ollama API for local LLM inference.

mod config;
mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use config::LlmConfig;
pub use prompts::{DEFAULT_QA_PROMPT, DEFAULT_SUMMARY_PROMPT, DEFAULT_TAGS_PROMPT};

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("LLM is disabled")]
    Disabled,
}

/// LLM client for text processing.
#[derive(Clone)]
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Check if the LLM service is available.
    pub async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        let url = format!("{}/api/tags", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// List available models.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.config.endpoint);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LlmError::Api(format!("HTTP {}", resp.status())));
        }

        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Check that the configured model is installed.
    pub async fn ensure_model(&self) -> Result<(), LlmError> {
        let models = self.list_models().await?;
        let wanted = &self.config.model;
        let found = models
            .iter()
            .any(|m| m == wanted || m.strip_suffix(":latest") == Some(wanted.as_str()));
        if found {
            Ok(())
        } else {
            Err(LlmError::ModelNotFound(wanted.clone()))
        }
    }

    /// Rewrite `text` as an abstractive summary of `min_length` to
    /// `max_length` tokens.
    ///
    /// Without `do_sample` the request runs at temperature 0.
    pub async fn generate_summary(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        do_sample: bool,
    ) -> Result<String, LlmError> {
        let prompt = self
            .config
            .get_summary_prompt()
            .replace("{min_length}", &min_length.to_string())
            .replace("{max_length}", &max_length.to_string())
            .replace("{content}", self.truncate_content(text));

        let options = OllamaOptions {
            temperature: if do_sample { self.config.temperature } else { 0.0 },
            num_predict: max_length as u32,
        };

        info!("Generating abstractive summary ({} chars in)", text.len());
        let response = self.call_ollama(&prompt, options).await?;

        let summary = response.trim().to_string();
        if summary.is_empty() {
            return Err(LlmError::Parse("Empty summary response".to_string()));
        }
        Ok(summary)
    }

    /// Generate keyword tags for a text.
    pub async fn generate_tags(&self, text: &str, max_keywords: usize) -> Result<Vec<String>, LlmError> {
        let prompt = self
            .config
            .get_tags_prompt()
            .replace("{max_keywords}", &max_keywords.to_string())
            .replace("{content}", self.truncate_content(text));

        debug!("Generating tags for {} chars", text.len());
        let response = self.call_ollama(&prompt, self.default_options()).await?;

        let tags = parse_tags(&response, max_keywords);
        if tags.is_empty() {
            return Err(LlmError::Parse("No tags parsed from response".to_string()));
        }
        Ok(tags)
    }

    /// Answer `question` with a span quoted from `context`.
    ///
    /// The whole context is sent; `max_content_chars` does not apply, since
    /// the answer may sit anywhere in it.
    pub async fn answer_question(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let prompt = self
            .config
            .get_qa_prompt()
            .replace("{question}", question)
            .replace("{context}", context);

        let options = OllamaOptions {
            temperature: 0.0,
            num_predict: self.config.max_tokens,
        };

        debug!("Answering question: {}", question);
        let response = self.call_ollama(&prompt, options).await?;
        Ok(clean_answer(&response))
    }

    fn default_options(&self) -> OllamaOptions {
        OllamaOptions {
            temperature: self.config.temperature,
            num_predict: self.config.max_tokens,
        }
    }

    /// Truncate content to configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        truncate_at_boundary(text, self.config.max_content_chars)
    }

    /// Call Ollama API with a prompt.
    async fn call_ollama(&self, prompt: &str, options: OllamaOptions) -> Result<String, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }

        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options,
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND && body.contains("not found") {
                return Err(LlmError::ModelNotFound(self.config.model.clone()));
            }
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama_resp: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(ollama_resp.response)
    }
}

/// Longest prefix of `text` within `max` bytes that ends on a char boundary.
fn truncate_at_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Parse tags from LLM response.
fn parse_tags(response: &str, max_tags: usize) -> Vec<String> {
    // Remove common prefixes/formatting
    let cleaned = response
        .trim()
        .trim_start_matches("Keywords:")
        .trim_start_matches("KEYWORDS:")
        .trim_start_matches("Tags:")
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();

    let mut tags: Vec<String> = Vec::new();
    for tag in cleaned.split(|c: char| c == ',' || c == '\n').map(|t| {
        t.trim()
            .trim_start_matches(|c: char| c == '-' || c == '*' || c == '\u{2022}')
            .to_lowercase()
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_')
            .to_string()
    }) {
        if !tag.is_empty() && tag.len() <= 50 && !tags.contains(&tag) {
            tags.push(tag);
        }
        if tags.len() == max_tags {
            break;
        }
    }
    tags
}

/// Strip quoting and answer labels the model adds around a span.
fn clean_answer(response: &str) -> String {
    let trimmed = response.trim();
    let trimmed = trimmed.strip_prefix("Answer:").unwrap_or(trimmed).trim();
    trimmed
        .trim_matches(|c: char| c == '"' || c == '\u{201c}' || c == '\u{201d}')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        // Simple comma-separated
        let tags = parse_tags("rust, memory-safety, ownership, 2024", 10);
        assert_eq!(tags, vec!["rust", "memory-safety", "ownership", "2024"]);

        // With brackets
        let tags = parse_tags("[rust, cargo, crates]", 10);
        assert_eq!(tags, vec!["rust", "cargo", "crates"]);

        // With prefix
        let tags = parse_tags("Keywords: rust, cargo", 10);
        assert_eq!(tags, vec!["rust", "cargo"]);

        // Mixed case and duplicates
        let tags = parse_tags("Rust, RUST, Cargo", 10);
        assert_eq!(tags, vec!["rust", "cargo"]);

        // One per line, capped
        let tags = parse_tags("- rust\n- cargo\n- crates", 2);
        assert_eq!(tags, vec!["rust", "cargo"]);
    }

    #[test]
    fn test_truncate_at_boundary() {
        assert_eq!(truncate_at_boundary("hello", 10), "hello");
        assert_eq!(truncate_at_boundary("hello", 3), "hel");
        // 'é' is two bytes; cutting inside it backs off
        assert_eq!(truncate_at_boundary("café", 4), "caf");
    }

    #[test]
    fn test_clean_answer() {
        assert_eq!(clean_answer("  \"Ferris\"\n"), "Ferris");
        assert_eq!(clean_answer("Answer: the crab"), "the crab");
        assert_eq!(clean_answer("plain"), "plain");
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert!(config.enabled);
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert!(config.summary_prompt.is_none());
        assert!(config.get_summary_prompt().contains("{content}"));
        assert!(config.get_qa_prompt().contains("{question}"));
    }

    #[tokio::test]
    async fn test_disabled_client_refuses() {
        let config = LlmConfig {
            enabled: false,
            ..LlmConfig::default()
        };
        let client = LlmClient::new(config).unwrap();
        let err = client.answer_question("q", "c").await.unwrap_err();
        assert!(matches!(err, LlmError::Disabled));
        assert!(!client.is_available().await);
    }
}
