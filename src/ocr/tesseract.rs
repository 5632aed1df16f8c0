//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction.

use std::path::Path;
use std::process::Command;

use super::backend::{OcrBackend, OcrConfig, OcrError};
use super::tools::{check_binary, handle_cmd_output, TESSERACT_NOT_FOUND};

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn run_ocr(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.config.language])
            .output();

        handle_cmd_output(output, TESSERACT_NOT_FOUND, "tesseract failed")
    }
}
