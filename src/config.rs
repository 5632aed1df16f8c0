//! Configuration management for echosift using the prefer crate.
//!
//! A config file is discovered by name (`echosift.toml`, `.yaml`, `.json`
//! in the usual locations), parsed with serde by extension, and then
//! environment variables are layered on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::http_client::DEFAULT_MAX_REDIRECTS;
use crate::llm::LlmConfig;
use crate::nlp::{
    KeywordBackend, SummaryOptions, DEFAULT_BOILERPLATE, DEFAULT_MAX_INPUT_TOKENS,
    DEFAULT_MAX_KEYWORDS, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_RATIO,
};
use crate::ocr::DEFAULT_DPI;
use crate::security::MAX_SAFE_REDIRECTS;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// HTTP fetching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperSettings {
    /// User agent string; unset for the browser-like default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Redirects followed before a request fails.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Longest redirect chain accepted for extraction.
    #[serde(default = "default_max_safe_redirects")]
    pub max_safe_redirects: usize,
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_max_safe_redirects() -> usize {
    MAX_SAFE_REDIRECTS
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            user_agent: None,
            request_timeout: default_request_timeout(),
            max_redirects: default_max_redirects(),
            max_safe_redirects: default_max_safe_redirects(),
        }
    }
}

/// PDF rasterization and OCR settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfSettings {
    /// Tesseract language code(s), e.g. "eng" or "eng+deu".
    #[serde(default = "default_tesseract_lang")]
    pub tesseract_lang: String,
    /// Rendering resolution for OCR.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

fn default_tesseract_lang() -> String {
    "eng".to_string()
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            tesseract_lang: default_tesseract_lang(),
            dpi: default_dpi(),
        }
    }
}

/// Summarization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerSettings {
    /// Tokens of extractive summary passed to the abstractive stage.
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Share of sentences kept by the extractive stage.
    #[serde(default = "default_extractive_ratio")]
    pub extractive_ratio: f64,
    /// Hugging Face `tokenizer.json`; whitespace tokens when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer_path: Option<String>,
    /// Phrases removed before summarizing when preprocessing is on.
    #[serde(default = "default_boilerplate")]
    pub boilerplate: Vec<String>,
}

fn default_max_input_tokens() -> usize {
    DEFAULT_MAX_INPUT_TOKENS
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_extractive_ratio() -> f64 {
    DEFAULT_RATIO
}

fn default_boilerplate() -> Vec<String> {
    DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect()
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            max_input_tokens: default_max_input_tokens(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            extractive_ratio: default_extractive_ratio(),
            tokenizer_path: None,
            boilerplate: default_boilerplate(),
        }
    }
}

impl SummarizerSettings {
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_input_tokens: self.max_input_tokens,
            min_length: self.min_length,
            max_length: self.max_length,
            boilerplate: self.boilerplate.clone(),
        }
    }
}

/// Keyword extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSettings {
    #[serde(default)]
    pub backend: KeywordBackend,
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            backend: KeywordBackend::default(),
            max_keywords: default_max_keywords(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperSettings,
    #[serde(default)]
    pub pdf: PdfSettings,
    #[serde(default)]
    pub summarizer: SummarizerSettings,
    #[serde(default)]
    pub keywords: KeywordSettings,
    #[serde(default)]
    pub llm: LlmConfig,
    /// File this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or discover it with prefer.
    ///
    /// An explicit path that cannot be loaded is an error; a discovered file
    /// that cannot be parsed is skipped with a warning.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from_path(path).await;
        }

        match prefer::load("echosift").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        warn!("Ignoring config file: {}", e);
                        Ok(Self::default_with_env())
                    }
                },
                None => Ok(Self::default_with_env()),
            },
            Err(_) => {
                debug!("No config file found, using defaults");
                Ok(Self::default_with_env())
            }
        }
    }

    /// Create a default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config.with_env_overrides())
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_error("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_error("JSON", e.to_string())),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `ECHOSIFT_USER_AGENT`: User agent string
    /// - `ECHOSIFT_TIMEOUT`: Request timeout in seconds
    /// - `ECHOSIFT_TOKENIZER`: Path to a `tokenizer.json`
    /// - `ECHOSIFT_KEYWORDS`: Keyword backend ("rake" or "llm")
    /// - `TESSERACT_LANG`: OCR language
    /// - `LLM_*`: see [`LlmConfig::with_env_overrides`]
    pub fn with_env_overrides(self) -> Self {
        let mut config = self.apply_overrides(|key| std::env::var(key).ok());
        config.llm = config.llm.with_env_overrides();
        config
    }

    fn apply_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = var("ECHOSIFT_USER_AGENT").filter(|s| !s.is_empty()) {
            self.scraper.user_agent = Some(val);
        }
        if let Some(val) = var("ECHOSIFT_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.scraper.request_timeout = secs;
            }
        }
        if let Some(val) = var("ECHOSIFT_TOKENIZER").filter(|s| !s.is_empty()) {
            self.summarizer.tokenizer_path = Some(val);
        }
        if let Some(val) = var("ECHOSIFT_KEYWORDS") {
            match val.parse::<KeywordBackend>() {
                Ok(backend) => self.keywords.backend = backend,
                Err(e) => warn!("Ignoring ECHOSIFT_KEYWORDS: {}", e),
            }
        }
        if let Some(val) = var("TESSERACT_LANG").filter(|s| !s.is_empty()) {
            self.pdf.tesseract_lang = val;
        }
        self
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise the CWD.
    pub fn base_dir(&self) -> PathBuf {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Resolved tokenizer file, if one is configured.
    pub fn tokenizer_path(&self) -> Option<PathBuf> {
        self.summarizer
            .tokenizer_path
            .as_deref()
            .map(|p| self.resolve_path(p, &self.base_dir()))
    }
}
