//! Helpers for running the external Poppler and Tesseract binaries.

use std::process::{ExitStatus, Output};

use super::backend::OcrError;

pub const PDFTOTEXT_NOT_FOUND: &str = "pdftotext not found (install poppler-utils)";
pub const PDFINFO_NOT_FOUND: &str = "pdfinfo not found (install poppler-utils)";
pub const PDFTOPPM_NOT_FOUND: &str = "pdftoppm not found (install poppler-utils)";
pub const TESSERACT_NOT_FOUND: &str = "tesseract not found (install tesseract-ocr)";

/// Binaries the PDF extractor shells out to.
pub const REQUIRED_TOOLS: &[&str] = &["pdftotext", "pdfinfo", "pdftoppm", "tesseract"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Report availability of every tool the PDF extractor needs.
pub fn check_tools() -> Vec<(String, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Handle command output, extracting stdout on success or returning appropriate error.
pub fn handle_cmd_output(
    result: std::io::Result<Output>,
    not_found: &str,
    error_prefix: &str,
) -> Result<String, OcrError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::OcrFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(OcrError::BackendNotAvailable(not_found.to_string()))
        }
        Err(e) => Err(OcrError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
pub fn check_cmd_status(
    result: std::io::Result<ExitStatus>,
    not_found: &str,
    error_msg: &str,
) -> Result<(), OcrError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(OcrError::OcrFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(OcrError::BackendNotAvailable(not_found.to_string()))
        }
        Err(e) => Err(OcrError::Io(e)),
    }
}
