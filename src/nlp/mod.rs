//! Text processing: tokenization, chunking, summarization, keywords, and Q&A.
//!
//! Heavy collaborators sit behind traits so the pipelines can run against
//! stubs; the defaults here are local and model-free, while the LLM-backed
//! implementations live in [`crate::llm`].

mod chunk;
mod codec;
mod keywords;
mod preprocess;
mod qna;
mod stopwords;
mod summarizer;
mod textrank;
pub mod tokenize;

pub use chunk::{NounChunker, RuleNounChunker};
pub use codec::{CodecError, HfTokenizer, TokenCodec, WhitespaceCodec};
pub use keywords::{
    KeywordBackend, KeywordError, KeywordExtractor, RakeExtractor, DEFAULT_MAX_KEYWORDS,
};
pub use preprocess::Preprocessor;
pub use qna::{ask, QaError, QuestionAnswerer, MISSING_INPUT};
pub use stopwords::is_stopword;
pub use summarizer::{
    strip_boilerplate, AbstractiveSummarizer, SummarizeError, Summarizer, SummaryOptions,
    DEFAULT_BOILERPLATE, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
    SUMMARY_UNAVAILABLE,
};
pub use textrank::{ExtractiveSummarizer, TextRank, DAMPING, DEFAULT_RATIO};
