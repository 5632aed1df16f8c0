//! Web page extraction.

use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use super::boilerplate::BoilerplateRemover;
use super::ScrapeError;
use crate::http_client::{HttpClient, HttpResponse};
use crate::models::{ExtractionMethod, ExtractionResult};
use crate::nlp::Preprocessor;
use crate::security::{check_redirect_count, detect_rate_limit};

/// Fetches pages and pulls their paragraph text.
#[derive(Clone)]
pub struct WebExtractor {
    client: HttpClient,
    max_safe_redirects: usize,
    boilerplate: Arc<dyn BoilerplateRemover>,
    preprocessor: Preprocessor,
}

impl WebExtractor {
    pub fn new(
        client: HttpClient,
        max_safe_redirects: usize,
        boilerplate: Arc<dyn BoilerplateRemover>,
        preprocessor: Preprocessor,
    ) -> Self {
        Self {
            client,
            max_safe_redirects,
            boilerplate,
            preprocessor,
        }
    }

    /// Fetch `url` and join the text of its `<p>` elements with single spaces.
    ///
    /// With `preprocess`, boilerplate is stripped from the page and the
    /// remaining body is tokenized and chunked.
    pub async fn extract(&self, url: &str, preprocess: bool) -> Result<ExtractionResult, ScrapeError> {
        let response = self.fetch(url).await?;
        let final_url = response.url.clone();
        let html = response.text().await?;

        let text = paragraph_text(&html);
        info!("Extracted {} chars of paragraph text from {}", text.len(), url);
        let result = ExtractionResult::new(text, url, ExtractionMethod::Html);

        if !preprocess {
            return Ok(result);
        }

        let clean_text = self.boilerplate.clean(&html, &final_url)?;
        let mut preprocessed = self.preprocessor.preprocess(&clean_text);
        preprocessed.clean_text = Some(clean_text);
        Ok(result.with_preprocessed(preprocessed))
    }

    /// Absolute URLs of every image on the page at `url`.
    pub async fn extract_images(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        let response = self.client.get(url).await?;
        let base = response.url.clone();
        let html = response.text().await?;
        Ok(image_urls(&html, &base))
    }

    /// GET `url`, rejecting long redirect chains and throttled responses.
    async fn fetch(&self, url: &str) -> Result<HttpResponse, ScrapeError> {
        let response = self.client.get(url).await?;

        let verdict = check_redirect_count(response.redirect_count(), self.max_safe_redirects);
        if !verdict.safe {
            warn!(
                "Refusing {} after {} redirects: {}",
                url,
                response.redirect_count(),
                verdict.message
            );
            return Err(ScrapeError::UnsafeRedirects(verdict.message));
        }

        let status = response.status.as_u16();
        if detect_rate_limit(status) {
            return Err(ScrapeError::RateLimited {
                status,
                url: response.url.to_string(),
            });
        }
        if !response.is_success() {
            debug!("{} answered HTTP {}, parsing body anyway", url, status);
        }

        Ok(response)
    }
}

/// Text of every `<p>` element, in document order, joined by single spaces.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("p") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `src` of every `<img>`, resolved against `base`.
pub fn image_urls(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("img[src]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter_map(|src| base.join(src.trim()).ok())
        .map(|u| u.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_space_joined() {
        let html = "<html><body><p>A.</p><div>skip</div><p>B.</p><p>C.</p></body></html>";
        assert_eq!(paragraph_text(html), "A. B. C.");
    }

    #[test]
    fn test_paragraph_text_includes_inline_markup() {
        let html = "<p>Hello <b>bold</b> <a href='/x'>link</a></p>";
        assert_eq!(paragraph_text(html), "Hello bold link");
    }

    #[test]
    fn test_paragraph_text_without_paragraphs() {
        assert_eq!(paragraph_text("<html><body><div>none</div></body></html>"), "");
    }

    #[test]
    fn test_image_urls_resolved_against_base() {
        let base = Url::parse("https://example.com/articles/post.html").unwrap();
        let html = r#"
            <img src="/static/logo.png">
            <img src="figure.jpg">
            <img src="https://cdn.example.org/a.gif">
            <img alt="no source">
            <img src="">
        "#;

        assert_eq!(
            image_urls(html, &base),
            vec![
                "https://example.com/static/logo.png",
                "https://example.com/articles/figure.jpg",
                "https://cdn.example.org/a.gif",
            ]
        );
    }
}
