//! Token encode/decode used to bound summarizer input.

use std::path::Path;

use thiserror::Error;

/// Errors from tokenizer loading, encoding, or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to load tokenizer from {path}: {message}")]
    Load { path: String, message: String },

    #[error("tokenization failed: {0}")]
    Encode(String),

    #[error("detokenization failed: {0}")]
    Decode(String),
}

/// Token-bounded truncation of summarizer input.
pub trait TokenCodec: Send + Sync {
    /// Cut `text` to its first `max_len` tokens, decoded back to text.
    fn truncate(&self, text: &str, max_len: usize) -> Result<String, CodecError>;
}

/// Codec backed by a Hugging Face `tokenizer.json`.
pub struct HfTokenizer {
    tokenizer: tokenizers::Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self, CodecError> {
        let tokenizer =
            tokenizers::Tokenizer::from_file(path).map_err(|e| CodecError::Load {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { tokenizer })
    }

    /// Encode `text`, keeping at most `max_len` token ids.
    pub fn encode(&self, text: &str, max_len: usize) -> Result<Vec<u32>, CodecError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        let mut ids = encoding.get_ids().to_vec();
        ids.truncate(max_len);
        Ok(ids)
    }

    /// Decode ids back to text, skipping special tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<String, CodecError> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| CodecError::Decode(e.to_string()))
    }
}

impl TokenCodec for HfTokenizer {
    fn truncate(&self, text: &str, max_len: usize) -> Result<String, CodecError> {
        let ids = self.encode(text, max_len)?;
        self.decode(&ids)
    }
}

/// Whitespace word codec used when no tokenizer file is configured.
///
/// Each word counts as one token; nothing is kept between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCodec;

impl WhitespaceCodec {
    pub fn new() -> Self {
        Self
    }
}

impl TokenCodec for WhitespaceCodec {
    fn truncate(&self, text: &str, max_len: usize) -> Result<String, CodecError> {
        Ok(text
            .split_whitespace()
            .take(max_len)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_truncate() {
        let codec = WhitespaceCodec::new();
        assert_eq!(codec.truncate("one two  three\nfour", 3).unwrap(), "one two three");
        assert_eq!(codec.truncate("short", 10).unwrap(), "short");
        assert_eq!(codec.truncate("   ", 10).unwrap(), "");
    }

    #[test]
    fn test_whitespace_codec_holds_no_state() {
        assert_eq!(std::mem::size_of::<WhitespaceCodec>(), 0);

        let codec = WhitespaceCodec::new();
        for n in 0..1000 {
            let text = format!("doc{} word{}", n, n);
            assert_eq!(codec.truncate(&text, 1024).unwrap(), text);
        }
        assert_eq!(codec.truncate("doc0 word0 extra", 1).unwrap(), "doc0");
    }

    #[test]
    fn test_missing_tokenizer_file() {
        let err = HfTokenizer::from_file(Path::new("/nonexistent/tokenizer.json"))
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::Load { .. }));
    }
}
