//! LLM integration for abstractive summaries, keyword tags, and answers.

mod client;
mod tasks;

pub use client::{
    LlmClient, LlmConfig, LlmError, DEFAULT_QA_PROMPT, DEFAULT_SUMMARY_PROMPT, DEFAULT_TAGS_PROMPT,
};
pub use tasks::LlmTagger;
