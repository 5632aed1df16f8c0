//! LLM client configuration.

use serde::{Deserialize, Serialize};

use super::prompts::{DEFAULT_QA_PROMPT, DEFAULT_SUMMARY_PROMPT, DEFAULT_TAGS_PROMPT};

/// Configuration for the Ollama-backed LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether LLM-backed stages may run
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ollama API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model used for summaries, tags, and answers
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in tag and answer responses
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for sampled generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Custom summary prompt ({content}, {min_length}, {max_length})
    #[serde(default)]
    pub summary_prompt: Option<String>,
    /// Custom tags prompt ({content}, {max_keywords})
    #[serde(default)]
    pub tags_prompt: Option<String>,
    /// Custom question answering prompt ({context}, {question})
    #[serde(default)]
    pub qa_prompt: Option<String>,
    /// Maximum characters of content in summary and tag prompts
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout() -> u64 {
    300
}

fn default_max_content_chars() -> usize {
    12000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout: default_timeout(),
            summary_prompt: None,
            tags_prompt: None,
            qa_prompt: None,
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_ENDPOINT`: Ollama API endpoint
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in tag and answer responses
    /// - `LLM_TEMPERATURE`: Sampling temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: Max content chars to send
    /// - `LLM_SUMMARY_PROMPT`, `LLM_TAGS_PROMPT`, `LLM_QA_PROMPT`: Custom prompts
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
        if let Ok(val) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_content_chars = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_SUMMARY_PROMPT") {
            self.summary_prompt = Some(val);
        }
        if let Ok(val) = std::env::var("LLM_TAGS_PROMPT") {
            self.tags_prompt = Some(val);
        }
        if let Ok(val) = std::env::var("LLM_QA_PROMPT") {
            self.qa_prompt = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Get the summary prompt, using custom or default.
    pub fn get_summary_prompt(&self) -> &str {
        self.summary_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SUMMARY_PROMPT)
    }

    /// Get the tags prompt, using custom or default.
    pub fn get_tags_prompt(&self) -> &str {
        self.tags_prompt.as_deref().unwrap_or(DEFAULT_TAGS_PROMPT)
    }

    /// Get the question answering prompt, using custom or default.
    pub fn get_qa_prompt(&self) -> &str {
        self.qa_prompt.as_deref().unwrap_or(DEFAULT_QA_PROMPT)
    }
}
