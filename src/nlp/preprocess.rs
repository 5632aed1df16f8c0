//! Tokenization and chunking applied to extracted text on request.

use std::sync::Arc;

use super::chunk::NounChunker;
use super::tokenize::{sentences, words};
use crate::models::Preprocessed;

/// Computes words, sentences, and noun-phrase chunks for a text.
#[derive(Clone)]
pub struct Preprocessor {
    chunker: Arc<dyn NounChunker>,
}

impl Preprocessor {
    pub fn new(chunker: Arc<dyn NounChunker>) -> Self {
        Self { chunker }
    }

    pub fn preprocess(&self, text: &str) -> Preprocessed {
        Preprocessed {
            clean_text: None,
            words: words(text),
            sentences: sentences(text),
            chunks: self.chunker.noun_chunks(text),
        }
    }
}
