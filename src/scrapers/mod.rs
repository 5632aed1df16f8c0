//! Text extraction from web pages and PDF documents.

mod boilerplate;
mod pdf;
mod web;

pub use boilerplate::{BoilerplateRemover, ReadabilityRemover};
pub use pdf::{needs_ocr, ExtractionError, PdfExtractor};
pub use web::{image_urls, paragraph_text, WebExtractor};

use thiserror::Error;

use crate::http_client::HttpError;

/// Errors from fetching and parsing web pages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("failed to read response body: {0}")]
    Body(#[from] reqwest::Error),

    /// The response failed the redirect-chain heuristic.
    #[error("Security Warning: {0}")]
    UnsafeRedirects(String),

    #[error("article extraction failed: {0}")]
    Article(String),

    #[error("rate limited by {url} (HTTP {status})")]
    RateLimited { status: u16, url: String },
}
