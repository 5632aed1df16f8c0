//! Values produced by the extraction and analysis pipeline.
//!
//! Everything here is request-scoped: created once per call, never mutated,
//! never persisted.

use serde::{Deserialize, Serialize};

/// Method used to obtain the text of an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Paragraph text parsed out of fetched HTML.
    Html,
    /// Embedded PDF text layer.
    TextLayer,
    /// Rasterized PDF pages run through OCR.
    Ocr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Html => "html",
            ExtractionMethod::TextLayer => "text-layer",
            ExtractionMethod::Ocr => "ocr",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tokens and noun-phrase chunks computed over extracted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprocessed {
    /// Boilerplate-free body text the tokens were computed over (web only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_text: Option<String>,
    pub words: Vec<String>,
    pub sentences: Vec<String>,
    pub chunks: Vec<String>,
}

/// Text extracted from a single source.
///
/// An empty `text` means nothing could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessed: Option<Preprocessed>,
    /// URL or file name the text came from.
    pub source: String,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn new(text: String, source: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            text,
            preprocessed: None,
            source: source.into(),
            method,
        }
    }

    pub fn with_preprocessed(mut self, preprocessed: Preprocessed) -> Self {
        self.preprocessed = Some(preprocessed);
        self
    }

    /// Whether extraction produced no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Outcome of a security heuristic over a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityVerdict {
    pub safe: bool,
    pub message: String,
}

impl SecurityVerdict {
    pub fn safe() -> Self {
        Self {
            safe: true,
            message: "Safe".to_string(),
        }
    }

    pub fn unsafe_because(message: impl Into<String>) -> Self {
        Self {
            safe: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_result_empty() {
        let result = ExtractionResult::new("  \n ".to_string(), "a.pdf", ExtractionMethod::Ocr);
        assert!(result.is_empty());
        assert!(result.preprocessed.is_none());
    }

    #[test]
    fn test_preprocessed_omitted_when_absent() {
        let result = ExtractionResult::new("A.".to_string(), "http://x", ExtractionMethod::Html);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("preprocessed").is_none());
        assert_eq!(json["method"], "html");
    }
}
