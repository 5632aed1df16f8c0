//! echosift - text extraction, summarization, and Q&A for web pages and PDFs.
//!
//! The library exposes the extraction and NLP pipeline; the `echosift`
//! binary wraps it in a command-line interface.

pub mod config;
pub mod http_client;
pub mod llm;
pub mod models;
pub mod nlp;
pub mod ocr;
pub mod pipelines;
pub mod scrapers;
pub mod security;

pub use config::Config;
pub use models::{ExtractionMethod, ExtractionResult, Preprocessed, SecurityVerdict};
pub use pipelines::Pipelines;
