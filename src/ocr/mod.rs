//! OCR and PDF text extraction tools.
//!
//! Extracts text from documents using:
//! - pdftotext/pdfinfo (Poppler) for the embedded PDF text layer
//! - pdftoppm (Poppler) to rasterize pages
//! - Tesseract OCR for the rasterized pages
//!
//! Each tool sits behind a trait so the PDF extractor can be exercised
//! without the binaries installed.

mod backend;
mod pdf_utils;
mod tesseract;
mod text_layer;
mod tools;

pub use backend::{OcrBackend, OcrConfig, OcrError, OcrResult};
pub use pdf_utils::{list_page_images, PageRenderer, PdftoppmRenderer, DEFAULT_DPI};
pub use tesseract::TesseractBackend;
pub use text_layer::{PdfToTextReader, TextLayerReader};
pub use tools::{check_binary, check_tools};
