//! Span-extraction question answering.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::LlmError;

/// Shown when either input is blank.
pub const MISSING_INPUT: &str = "Both Context and Question are required!";

/// Errors from question answering.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("{}", MISSING_INPUT)]
    MissingInput,

    #[error("question answering failed: {0}")]
    Backend(#[from] LlmError),
}

/// Answers a question with a span taken from the context.
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<String, QaError>;
}

/// Ask `question` against `context`.
///
/// The backend's top answer is returned as-is; there is no confidence
/// threshold and no "no answer" result.
pub async fn ask(
    answerer: &dyn QuestionAnswerer,
    context: &str,
    question: &str,
) -> Result<String, QaError> {
    if context.trim().is_empty() || question.trim().is_empty() {
        return Err(QaError::MissingInput);
    }
    answerer.answer(question, context).await
}
