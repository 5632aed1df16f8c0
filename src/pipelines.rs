//! The process-wide set of loaded collaborators.
//!
//! [`Pipelines`] is built once from [`Config`] at startup and shared
//! read-only (usually behind an `Arc`) by every operation.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::http_client::{HttpClient, HttpError};
use crate::llm::{LlmClient, LlmError, LlmTagger};
use crate::models::ExtractionResult;
use crate::nlp::{
    self, AbstractiveSummarizer, CodecError, ExtractiveSummarizer, HfTokenizer, KeywordBackend,
    KeywordError, KeywordExtractor, NounChunker, Preprocessor, QaError, QuestionAnswerer,
    RakeExtractor, RuleNounChunker, SummarizeError, Summarizer, TextRank, TokenCodec,
    WhitespaceCodec,
};
use crate::ocr::{
    OcrBackend, OcrConfig, PageRenderer, PdfToTextReader, PdftoppmRenderer, TesseractBackend,
    TextLayerReader,
};
use crate::scrapers::{
    BoilerplateRemover, ReadabilityRemover, ExtractionError, PdfExtractor, ScrapeError,
    WebExtractor,
};

/// Errors from building the pipelines.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Tokenizer(#[from] CodecError),
}

/// Collaborators used to assemble [`Pipelines`].
///
/// Defaults come from [`Components::from_config`]; tests swap individual
/// fields for stubs.
#[derive(Clone)]
pub struct Components {
    pub http: HttpClient,
    pub max_safe_redirects: usize,
    pub boilerplate: Arc<dyn BoilerplateRemover>,
    pub chunker: Arc<dyn NounChunker>,
    pub text_layer: Arc<dyn TextLayerReader>,
    pub renderer: Arc<dyn PageRenderer>,
    pub ocr: Arc<dyn OcrBackend>,
    pub extractive: Arc<dyn ExtractiveSummarizer>,
    pub codec: Arc<dyn TokenCodec>,
    pub abstractive: Arc<dyn AbstractiveSummarizer>,
    pub keywords: Arc<dyn KeywordExtractor>,
    pub answerer: Arc<dyn QuestionAnswerer>,
}

impl Components {
    /// Default collaborators for `config`.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        let mut http = HttpClient::builder(Duration::from_secs(config.scraper.request_timeout))
            .max_redirects(config.scraper.max_redirects);
        if let Some(ref ua) = config.scraper.user_agent {
            http = http.user_agent(ua);
        }

        let llm = LlmClient::new(config.llm.clone())?;

        let codec: Arc<dyn TokenCodec> = match config.tokenizer_path() {
            Some(path) => {
                info!("Loading tokenizer from {}", path.display());
                Arc::new(HfTokenizer::from_file(&path)?)
            }
            None => Arc::new(WhitespaceCodec::new()),
        };

        let keywords: Arc<dyn KeywordExtractor> = match config.keywords.backend {
            KeywordBackend::Rake => Arc::new(RakeExtractor::new(config.keywords.max_keywords)),
            KeywordBackend::Llm => {
                Arc::new(LlmTagger::new(llm.clone(), config.keywords.max_keywords))
            }
        };

        let ocr_config = OcrConfig {
            language: config.pdf.tesseract_lang.clone(),
        };

        Ok(Self {
            http: http.build()?,
            max_safe_redirects: config.scraper.max_safe_redirects,
            boilerplate: Arc::new(ReadabilityRemover::new()),
            chunker: Arc::new(RuleNounChunker::new()),
            text_layer: Arc::new(PdfToTextReader::new()),
            renderer: Arc::new(PdftoppmRenderer::with_dpi(config.pdf.dpi)),
            ocr: Arc::new(TesseractBackend::with_config(ocr_config)),
            extractive: Arc::new(TextRank::with_ratio(config.summarizer.extractive_ratio)),
            codec,
            abstractive: Arc::new(llm.clone()),
            keywords,
            answerer: Arc::new(llm),
        })
    }
}

/// Extraction, summarization, keyword, and Q&A operations over one set of
/// loaded collaborators.
#[derive(Clone)]
pub struct Pipelines {
    web: WebExtractor,
    pdf: PdfExtractor,
    summarizer: Summarizer,
    keywords: Arc<dyn KeywordExtractor>,
    answerer: Arc<dyn QuestionAnswerer>,
}

impl Pipelines {
    /// Build the default pipelines for `config`.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        Ok(Self::from_components(
            Components::from_config(config)?,
            config.summarizer.summary_options(),
        ))
    }

    pub fn from_components(components: Components, options: nlp::SummaryOptions) -> Self {
        let preprocessor = Preprocessor::new(components.chunker);

        Self {
            web: WebExtractor::new(
                components.http,
                components.max_safe_redirects,
                components.boilerplate,
                preprocessor.clone(),
            ),
            pdf: PdfExtractor::new(
                components.text_layer,
                components.renderer,
                components.ocr,
                preprocessor,
            ),
            summarizer: Summarizer::new(
                components.extractive,
                components.codec,
                components.abstractive,
                options,
            ),
            keywords: components.keywords,
            answerer: components.answerer,
        }
    }

    /// Fetch a page and extract its paragraph text.
    pub async fn extract_from_web(
        &self,
        url: &str,
        preprocess: bool,
    ) -> Result<ExtractionResult, ScrapeError> {
        self.web.extract(url, preprocess).await
    }

    /// Extract text from PDF bytes, falling back to OCR for scanned documents.
    pub async fn extract_from_pdf(
        &self,
        bytes: &[u8],
        name: &str,
        preprocess: bool,
    ) -> Result<ExtractionResult, ExtractionError> {
        self.pdf.extract(bytes, name, preprocess).await
    }

    pub async fn summarize(&self, text: &str, preprocess: bool) -> Result<String, SummarizeError> {
        self.summarizer.summarize(text, preprocess).await
    }

    /// Summarize extracted text with known boilerplate always stripped.
    pub async fn summarize_extraction(
        &self,
        result: &ExtractionResult,
    ) -> Result<String, SummarizeError> {
        self.summarizer.summarize(&result.text, true).await
    }

    pub async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, KeywordError> {
        self.keywords.extract(text).await
    }

    /// Answer `question` from `context`; blank inputs are rejected.
    pub async fn answer(&self, context: &str, question: &str) -> Result<String, QaError> {
        nlp::ask(self.answerer.as_ref(), context, question).await
    }

    /// Absolute URLs of the images on a page.
    pub async fn extract_images(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        self.web.extract_images(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_defaults() {
        let pipelines = Pipelines::from_config(&Config::default());
        assert!(pipelines.is_ok());
    }

    #[test]
    fn test_missing_tokenizer_fails_build() {
        let mut config = Config::default();
        config.summarizer.tokenizer_path = Some("/nonexistent/tokenizer.json".to_string());
        assert!(matches!(
            Pipelines::from_config(&config),
            Err(BuildError::Tokenizer(_))
        ));
    }
}
