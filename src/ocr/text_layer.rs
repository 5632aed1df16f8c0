//! Embedded text-layer extraction from PDFs.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::backend::OcrError;
use super::tools::{check_binary, handle_cmd_output, PDFINFO_NOT_FOUND, PDFTOTEXT_NOT_FOUND};

/// Reads the embedded text layer of a PDF.
pub trait TextLayerReader: Send + Sync {
    /// Extract text for each page, in page order. Pages without a text
    /// layer yield empty strings.
    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, OcrError>;
}

/// Text-layer reader backed by Poppler's `pdftotext` and `pdfinfo`.
#[derive(Debug, Default)]
pub struct PdfToTextReader;

impl PdfToTextReader {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available(&self) -> bool {
        check_binary("pdftotext")
    }

    /// Get the page count of a PDF.
    pub fn page_count(&self, file_path: &Path) -> Result<Option<u32>, OcrError> {
        let stdout = handle_cmd_output(
            Command::new("pdfinfo").arg(file_path).output(),
            PDFINFO_NOT_FOUND,
            "pdfinfo failed",
        )?;
        Ok(parse_page_count(&stdout))
    }

    /// Run pdftotext on a single page of a PDF file.
    pub fn page_text(&self, file_path: &Path, page: u32) -> Result<String, OcrError> {
        let page_str = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(file_path)
            .arg("-")
            .output();

        handle_cmd_output(
            output,
            PDFTOTEXT_NOT_FOUND,
            &format!("pdftotext failed on page {}", page),
        )
    }

    /// Run pdftotext over the whole document.
    fn document_text(&self, file_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8"])
            .arg(file_path)
            .arg("-")
            .output();

        handle_cmd_output(output, PDFTOTEXT_NOT_FOUND, "pdftotext failed")
    }
}

impl TextLayerReader for PdfToTextReader {
    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, OcrError> {
        match self.page_count(pdf_path)? {
            Some(count) => {
                debug!("Reading text layer of {} pages", count);
                (1..=count).map(|page| self.page_text(pdf_path, page)).collect()
            }
            None => Ok(vec![self.document_text(pdf_path)?]),
        }
    }
}

/// Parse the `Pages:` line of pdfinfo output.
fn parse_page_count(pdfinfo: &str) -> Option<u32> {
    pdfinfo
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse().ok())
}
