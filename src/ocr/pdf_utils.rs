//! PDF-to-image conversion for OCR.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::backend::OcrError;
use super::tools::{check_binary, check_cmd_status, PDFTOPPM_NOT_FOUND};

/// Default rendering resolution; 300 DPI is where Tesseract accuracy levels off.
pub const DEFAULT_DPI: u32 = 300;

/// Renders the pages of a PDF to image files.
pub trait PageRenderer: Send + Sync {
    /// Render every page of `pdf_path` into `output_dir`, returning the image
    /// paths in page order.
    fn render_pages(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, OcrError>;
}

/// Page renderer backed by Poppler's `pdftoppm`.
pub struct PdftoppmRenderer {
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new() -> Self {
        Self { dpi: DEFAULT_DPI }
    }

    pub fn with_dpi(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn is_available(&self) -> bool {
        check_binary("pdftoppm")
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_pages(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let dpi = self.dpi.to_string();
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi])
            .arg(pdf_path)
            .arg(output_dir.join("page"))
            .status();

        check_cmd_status(
            status,
            PDFTOPPM_NOT_FOUND,
            "pdftoppm failed to convert PDF",
        )?;

        let images = list_page_images(output_dir)?;
        if images.is_empty() {
            return Err(OcrError::OcrFailed(
                "No images generated from PDF".to_string(),
            ));
        }
        Ok(images)
    }
}

/// List rendered page images in page order.
///
/// pdftoppm zero-pads page numbers to the width of the page count, so a
/// lexical sort is a page sort.
pub fn list_page_images(dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    images.sort();
    Ok(images)
}
