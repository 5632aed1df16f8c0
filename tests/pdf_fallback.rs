//! Text-layer-first PDF extraction with OCR fallback, over stub tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use echosift::nlp::{Preprocessor, RuleNounChunker};
use echosift::ocr::{OcrBackend, OcrError, PageRenderer, TextLayerReader};
use echosift::scrapers::PdfExtractor;
use echosift::ExtractionMethod;

enum Layer {
    Pages(Vec<&'static str>),
    Broken,
}

struct StubTextLayer {
    layer: Layer,
    calls: AtomicUsize,
}

impl TextLayerReader for StubTextLayer {
    fn page_texts(&self, _pdf_path: &Path) -> Result<Vec<String>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.layer {
            Layer::Pages(pages) => Ok(pages.iter().map(|p| p.to_string()).collect()),
            Layer::Broken => Err(OcrError::OcrFailed("no text layer".to_string())),
        }
    }
}

/// Writes one placeholder image per page into the output directory.
struct StubRenderer {
    pages: usize,
    calls: AtomicUsize,
}

impl PageRenderer for StubRenderer {
    fn render_pages(&self, _pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (1..=self.pages)
            .map(|n| {
                let path = output_dir.join(format!("page-{}.png", n));
                fs::write(&path, b"png")?;
                Ok(path)
            })
            .collect()
    }
}

struct StubOcr {
    calls: AtomicUsize,
}

impl OcrBackend for StubOcr {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        String::new()
    }

    fn run_ocr(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Ok(format!("scanned {}", stem))
    }
}

struct Harness {
    text_layer: Arc<StubTextLayer>,
    renderer: Arc<StubRenderer>,
    ocr: Arc<StubOcr>,
    extractor: PdfExtractor,
}

fn harness(layer: Layer) -> Harness {
    let text_layer = Arc::new(StubTextLayer {
        layer,
        calls: AtomicUsize::new(0),
    });
    let renderer = Arc::new(StubRenderer {
        pages: 2,
        calls: AtomicUsize::new(0),
    });
    let ocr = Arc::new(StubOcr {
        calls: AtomicUsize::new(0),
    });
    let extractor = PdfExtractor::new(
        text_layer.clone(),
        renderer.clone(),
        ocr.clone(),
        Preprocessor::new(Arc::new(RuleNounChunker::new())),
    );
    Harness {
        text_layer,
        renderer,
        ocr,
        extractor,
    }
}

#[tokio::test]
async fn test_text_layer_skips_ocr() {
    let h = harness(Layer::Pages(vec!["First page.", "Second page."]));

    let result = h.extractor.extract(b"%PDF-1.4", "report.pdf", false).await.unwrap();
    assert_eq!(result.text, "First page.\nSecond page.");
    assert_eq!(result.method, ExtractionMethod::TextLayer);
    assert_eq!(result.source, "report.pdf");
    assert!(result.preprocessed.is_none());

    assert_eq!(h.text_layer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.ocr.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_text_layer_falls_back_to_ocr() {
    let h = harness(Layer::Pages(vec!["  ", "\n\x0c"]));

    let result = h.extractor.extract(b"%PDF-1.4", "scan.pdf", false).await.unwrap();
    assert_eq!(result.method, ExtractionMethod::Ocr);
    assert_eq!(result.text, "scanned page-1\nscanned page-2");

    assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.ocr.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreadable_text_layer_falls_back_to_ocr() {
    let h = harness(Layer::Broken);

    let result = h.extractor.extract(b"not really a pdf", "odd.pdf", false).await.unwrap();
    assert_eq!(result.method, ExtractionMethod::Ocr);
    assert!(!result.is_empty());
}

#[tokio::test]
async fn test_pdf_preprocess_has_no_clean_text() {
    let h = harness(Layer::Pages(vec!["The borrow checker rejected the program."]));

    let result = h.extractor.extract(b"%PDF-1.4", "rust.pdf", true).await.unwrap();
    let pre = result.preprocessed.unwrap();
    assert!(pre.clean_text.is_none());
    assert_eq!(pre.sentences, vec!["The borrow checker rejected the program."]);
    assert_eq!(pre.chunks, vec!["The borrow checker", "the program"]);
}

#[test]
fn test_extract_text_from_path() {
    let h = harness(Layer::Pages(vec!["Only page."]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    let (text, method) = h.extractor.extract_text(&path).unwrap();
    assert_eq!(text, "Only page.");
    assert_eq!(method, ExtractionMethod::TextLayer);
}
