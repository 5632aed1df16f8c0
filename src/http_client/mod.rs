//! HTTP client that follows redirects itself and keeps the redirect chain.
//!
//! reqwest hides intermediate redirects, so the client disables automatic
//! redirects and walks `Location` headers manually. The recorded history is
//! what the redirect-chain heuristic in [`crate::security`] inspects.

mod response;
mod user_agent;

pub use response::{HttpResponse, RedirectHop};
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::{Duration, Instant};

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default number of redirects followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Errors from HTTP requests.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("stopped after {limit} redirects at {url}")]
    TooManyRedirects { limit: usize, url: String },
}

/// HTTP client with browser-like identity and redirect tracking.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_redirects: usize,
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    max_redirects: usize,
}

impl HttpClientBuilder {
    /// Send `ua` instead of the default browser-like user agent.
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Set the number of redirects followed before the request fails.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub fn build(self) -> Result<HttpClient, HttpError> {
        let user_agent = resolve_user_agent(self.user_agent.as_deref());
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(HttpClient {
            client,
            max_redirects: self.max_redirects,
        })
    }
}

impl HttpClient {
    /// Start building a client with the given request timeout.
    pub fn builder(timeout: Duration) -> HttpClientBuilder {
        HttpClientBuilder {
            timeout,
            user_agent: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Make a GET request, following redirects and recording each hop.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let mut current = Url::parse(url)?;
        let mut history: Vec<RedirectHop> = Vec::new();
        let start = Instant::now();

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string());

                if let Some(location) = location {
                    if history.len() >= self.max_redirects {
                        return Err(HttpError::TooManyRedirects {
                            limit: self.max_redirects,
                            url: current.to_string(),
                        });
                    }
                    let next = current.join(&location)?;
                    debug!("{} {} -> {}", status.as_u16(), current, next);
                    history.push(RedirectHop {
                        url: current,
                        status,
                    });
                    current = next;
                    continue;
                }
            }

            debug!(
                "GET {} -> {} ({} redirects, {}ms)",
                url,
                status.as_u16(),
                history.len(),
                start.elapsed().as_millis()
            );

            return Ok(HttpResponse {
                status,
                history,
                url: current,
                response,
            });
        }
    }
}
