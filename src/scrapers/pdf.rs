//! PDF extraction: embedded text layer first, OCR for scanned documents.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ExtractionMethod, ExtractionResult};
use crate::nlp::Preprocessor;
use crate::ocr::{OcrBackend, OcrError, PageRenderer, TextLayerReader};

/// Errors from PDF extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to stage PDF: {0}")]
    Io(#[from] io::Error),

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Whether text-layer output is empty enough that the pages must be OCR'd.
pub fn needs_ocr(text: &str) -> bool {
    text.trim().is_empty()
}

/// Extracts text from PDFs with a text-layer-then-OCR strategy.
#[derive(Clone)]
pub struct PdfExtractor {
    text_layer: Arc<dyn TextLayerReader>,
    renderer: Arc<dyn PageRenderer>,
    ocr: Arc<dyn OcrBackend>,
    preprocessor: Preprocessor,
}

impl PdfExtractor {
    pub fn new(
        text_layer: Arc<dyn TextLayerReader>,
        renderer: Arc<dyn PageRenderer>,
        ocr: Arc<dyn OcrBackend>,
        preprocessor: Preprocessor,
    ) -> Self {
        Self {
            text_layer,
            renderer,
            ocr,
            preprocessor,
        }
    }

    /// Extract text from the PDF in `bytes`, reported under `name`.
    pub async fn extract(
        &self,
        bytes: &[u8],
        name: &str,
        preprocess: bool,
    ) -> Result<ExtractionResult, ExtractionError> {
        let mut staged = tempfile::Builder::new()
            .prefix("echosift-")
            .suffix(".pdf")
            .tempfile()?;
        staged.write_all(bytes)?;
        staged.flush()?;

        let this = self.clone();
        let (text, method) =
            tokio::task::spawn_blocking(move || this.extract_text(staged.path())).await??;

        info!("Extracted {} chars from {} via {}", text.len(), name, method);
        let result = ExtractionResult::new(text, name, method);

        if preprocess {
            let preprocessed = self.preprocessor.preprocess(&result.text);
            return Ok(result.with_preprocessed(preprocessed));
        }
        Ok(result)
    }

    /// Run the extraction strategy over a PDF on disk.
    ///
    /// The text layer is read first; pages are rendered and OCR'd only when
    /// [`needs_ocr`] holds for the text layer's output.
    pub fn extract_text(&self, pdf_path: &Path) -> Result<(String, ExtractionMethod), ExtractionError> {
        let text = self.read_text_layer(pdf_path);
        if !needs_ocr(&text) {
            return Ok((text, ExtractionMethod::TextLayer));
        }

        debug!("No text layer in {}, falling back to OCR", pdf_path.display());
        Ok((self.ocr_pages(pdf_path)?, ExtractionMethod::Ocr))
    }

    /// Text layer of every page; failures count as no text.
    fn read_text_layer(&self, pdf_path: &Path) -> String {
        match self.text_layer.page_texts(pdf_path) {
            Ok(pages) => pages.join("\n"),
            Err(e) => {
                debug!("Text layer unreadable for {}: {}", pdf_path.display(), e);
                String::new()
            }
        }
    }

    fn ocr_pages(&self, pdf_path: &Path) -> Result<String, ExtractionError> {
        let pages_dir = tempfile::tempdir()?;
        let images = self.renderer.render_pages(pdf_path, pages_dir.path())?;

        let mut pages = Vec::with_capacity(images.len());
        for image in &images {
            let result = self.ocr.ocr_image(image)?;
            debug!(
                "OCR'd {} with {} in {}ms",
                image.display(),
                result.backend,
                result.processing_time_ms
            );
            pages.push(result.text);
        }
        Ok(pages.join("\n"))
    }
}
