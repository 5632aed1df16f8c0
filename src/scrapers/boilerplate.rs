//! Main-content extraction for fetched HTML.
//!
//! Navigation, footers, and link lists are dropped by the readability
//! article extractor; what remains is the article body.

use tracing::debug;
use url::Url;

use super::ScrapeError;

/// Removes navigation, ads, and other chrome from a page.
pub trait BoilerplateRemover: Send + Sync {
    /// Return the main body text of `html`, fetched from `url`.
    fn clean(&self, html: &str, url: &Url) -> Result<String, ScrapeError>;
}

/// Boilerplate remover backed by the `readability` crate.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityRemover;

impl ReadabilityRemover {
    pub fn new() -> Self {
        Self
    }
}

impl BoilerplateRemover for ReadabilityRemover {
    fn clean(&self, html: &str, url: &Url) -> Result<String, ScrapeError> {
        let product = readability::extractor::extract(&mut html.as_bytes(), url)
            .map_err(|e| ScrapeError::Article(format!("{:?}", e)))?;
        debug!(
            "Readability kept {} of {} chars from {} ({:?})",
            product.text.len(),
            html.len(),
            url,
            product.title
        );
        Ok(product.text.trim().to_string())
    }
}
