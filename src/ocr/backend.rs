//! OCR backend abstraction.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;

/// Errors from OCR, page rendering, and text-layer tools.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of OCR over one image.
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    /// Backend that produced this result.
    pub backend: &'static str,
    pub processing_time_ms: u64,
}

/// Configuration shared by OCR backends.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Language for OCR (e.g., "eng", "deu").
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

/// An engine that turns an image of text into text.
pub trait OcrBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Check if this backend can run (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Core OCR: extract text from an image file.
    fn run_ocr(&self, image_path: &Path) -> Result<String, OcrError>;

    /// Run OCR on an image file, returning a timed result.
    fn ocr_image(&self, image_path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let text = self.run_ocr(image_path)?;
        Ok(OcrResult {
            text,
            backend: self.name(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
