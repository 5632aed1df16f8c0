//! Keyword extraction and question answering through the pipelines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use echosift::nlp::{
    AbstractiveSummarizer, ExtractiveSummarizer, QaError, QuestionAnswerer, RakeExtractor,
    SummarizeError, SummaryOptions, MISSING_INPUT,
};
use echosift::pipelines::{Components, Pipelines};
use echosift::{Config, ExtractionMethod, ExtractionResult};

/// Answers with the first word of the context.
#[derive(Default)]
struct FirstWordAnswerer {
    calls: AtomicUsize,
    questions: Mutex<Vec<String>>,
}

#[async_trait]
impl QuestionAnswerer for FirstWordAnswerer {
    async fn answer(&self, question: &str, context: &str) -> Result<String, QaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.questions.lock().unwrap().push(question.to_string());
        Ok(context.split_whitespace().next().unwrap_or_default().to_string())
    }
}

fn pipelines(answerer: Arc<FirstWordAnswerer>) -> Pipelines {
    let mut components = Components::from_config(&Config::default()).unwrap();
    components.answerer = answerer;
    components.keywords = Arc::new(RakeExtractor::new(3));
    Pipelines::from_components(components, SummaryOptions::default())
}

#[tokio::test]
async fn test_answer_returns_backend_span() {
    let answerer = Arc::new(FirstWordAnswerer::default());
    let pipelines = pipelines(answerer.clone());

    let answer = pipelines
        .answer("Paris is the capital of France.", "What is the capital of France?")
        .await
        .unwrap();
    assert_eq!(answer, "Paris");
    assert_eq!(
        answerer.questions.lock().unwrap().as_slice(),
        ["What is the capital of France?"]
    );
}

#[tokio::test]
async fn test_blank_inputs_rejected_before_backend() {
    let answerer = Arc::new(FirstWordAnswerer::default());
    let pipelines = pipelines(answerer.clone());

    for (context, question) in [("", "Why?"), ("Some context.", "   "), (" ", "")] {
        let err = pipelines.answer(context, question).await.unwrap_err();
        assert!(matches!(err, QaError::MissingInput));
        assert_eq!(err.to_string(), MISSING_INPUT);
    }
    assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_keywords_ranked_phrases() {
    let pipelines = pipelines(Arc::new(FirstWordAnswerer::default()));
    let text = "Compatibility of systems of linear constraints over the set of natural \
                numbers. Criteria of compatibility of a system of linear Diophantine \
                equations are considered.";

    let keywords = pipelines.extract_keywords(text).await.unwrap();
    assert_eq!(
        keywords,
        vec![
            "linear diophantine equations",
            "linear constraints",
            "natural numbers",
        ]
    );
}

#[tokio::test]
async fn test_keywords_empty_text() {
    let pipelines = pipelines(Arc::new(FirstWordAnswerer::default()));
    assert!(pipelines.extract_keywords("   ").await.unwrap().is_empty());
}

/// Passes its input through and records it.
#[derive(Default)]
struct EchoExtractive {
    seen: Mutex<Vec<String>>,
}

impl ExtractiveSummarizer for EchoExtractive {
    fn summarize(&self, text: &str) -> String {
        self.seen.lock().unwrap().push(text.to_string());
        text.to_string()
    }
}

struct UpperAbstractive;

#[async_trait]
impl AbstractiveSummarizer for UpperAbstractive {
    async fn summarize(
        &self,
        text: &str,
        _min_length: usize,
        _max_length: usize,
        _do_sample: bool,
    ) -> Result<String, SummarizeError> {
        Ok(text.to_uppercase())
    }
}

#[tokio::test]
async fn test_extraction_summary_strips_boilerplate() {
    let extractive = Arc::new(EchoExtractive::default());
    let mut components = Components::from_config(&Config::default()).unwrap();
    components.extractive = extractive.clone();
    components.abstractive = Arc::new(UpperAbstractive);
    let pipelines = Pipelines::from_components(components, SummaryOptions::default());

    let result = ExtractionResult::new(
        "Rust is fast. Join our newsletter today.".to_string(),
        "https://example.com/rust",
        ExtractionMethod::Html,
    );
    let summary = pipelines.summarize_extraction(&result).await.unwrap();

    assert_eq!(summary, "RUST IS FAST. TODAY.");
    assert_eq!(
        extractive.seen.lock().unwrap().as_slice(),
        ["Rust is fast.  today."]
    );
}
