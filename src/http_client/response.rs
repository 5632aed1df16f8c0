//! HTTP response wrapper.

use reqwest::{Response, StatusCode};
use url::Url;

/// One redirect that was followed on the way to the final response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    /// URL that answered with the redirect.
    pub url: Url,
    pub status: StatusCode,
}

/// HTTP response wrapper that remembers the redirect chain.
pub struct HttpResponse {
    pub status: StatusCode,
    /// Redirects followed before this response, oldest first.
    pub history: Vec<RedirectHop>,
    /// Final URL after redirects.
    pub url: Url,
    pub(crate) response: Response,
}

impl HttpResponse {
    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Number of redirects followed.
    pub fn redirect_count(&self) -> usize {
        self.history.len()
    }

    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}
