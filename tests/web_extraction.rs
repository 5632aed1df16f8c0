//! Web extraction against a local HTTP server.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Path;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use url::Url;

use echosift::http_client::{HttpClient, HttpError};
use echosift::nlp::SummaryOptions;
use echosift::pipelines::Components;
use echosift::scrapers::{BoilerplateRemover, ScrapeError};
use echosift::security::{check_redirects, TOO_MANY_REDIRECTS};
use echosift::{Config, ExtractionMethod, Pipelines};

const ARTICLE: &str = r#"<html><body>
  <nav><ul><li><a href="/">Home</a></li><li><a href="/docs">Docs</a></li></ul></nav>
  <article>
    <h1>Ownership</h1>
    <p>Every value in Rust has exactly one owner.</p>
    <p>The value is dropped when its owner goes out of scope.</p>
    <p>Moving a value, for example into a function, transfers ownership to the callee.</p>
  </article>
  <footer><p>Join our newsletter for weekly updates and news</p></footer>
</body></html>"#;

async fn echo_user_agent(headers: HeaderMap) -> Html<String> {
    let ua = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Html(format!("<p>{}</p>", ua))
}

async fn hop(Path(n): Path<u32>) -> Response {
    if n == 0 {
        Html("<p>arrived</p>").into_response()
    } else {
        Redirect::temporary(&format!("/hop/{}", n - 1)).into_response()
    }
}

fn app() -> Router {
    Router::new()
        .route(
            "/abc",
            get(|| async { Html("<html><body><p>A.</p><div>x</div><p>B.</p><p>C.</p></body></html>") }),
        )
        .route("/article", get(|| async { Html(ARTICLE) }))
        .route("/hop/:n", get(hop))
        .route("/ua", get(echo_user_agent))
        .route(
            "/limited",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, Html("<p>slow down</p>")) }),
        )
        .route(
            "/forbidden",
            get(|| async { (StatusCode::FORBIDDEN, Html("<p>go away</p>")) }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Html("<p>not here</p>")) }),
        )
        .route(
            "/gallery/index.html",
            get(|| async {
                Html(r#"<img src="a.png"><img src="/static/b.jpg"><img alt="none"><p>Photos</p>"#)
            }),
        )
}

async fn setup() -> (Pipelines, String) {
    let base = common::spawn_server(app()).await;
    let pipelines = Pipelines::from_config(&Config::default()).unwrap();
    (pipelines, base)
}

#[tokio::test]
async fn test_paragraphs_joined_with_spaces() {
    let (pipelines, base) = setup().await;
    let url = format!("{}/abc", base);

    let result = pipelines.extract_from_web(&url, false).await.unwrap();
    assert_eq!(result.text, "A. B. C.");
    assert_eq!(result.source, url);
    assert_eq!(result.method, ExtractionMethod::Html);
    assert!(result.preprocessed.is_none());
}

#[tokio::test]
async fn test_three_redirects_are_safe() {
    let (pipelines, base) = setup().await;
    let result = pipelines
        .extract_from_web(&format!("{}/hop/3", base), false)
        .await
        .unwrap();
    assert_eq!(result.text, "arrived");
}

#[tokio::test]
async fn test_four_redirects_are_refused() {
    let (pipelines, base) = setup().await;
    let err = pipelines
        .extract_from_web(&format!("{}/hop/4", base), false)
        .await
        .unwrap_err();
    match err {
        ScrapeError::UnsafeRedirects(message) => assert_eq!(message, TOO_MANY_REDIRECTS),
        other => panic!("expected unsafe redirects, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_follow_limit() {
    let (pipelines, base) = setup().await;
    let err = pipelines
        .extract_from_web(&format!("{}/hop/12", base), false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::Http(HttpError::TooManyRedirects { limit: 10, .. })
    ));
}

#[tokio::test]
async fn test_rate_limited_responses_fail() {
    let (pipelines, base) = setup().await;

    for (path, expected) in [("limited", 429), ("forbidden", 403)] {
        let err = pipelines
            .extract_from_web(&format!("{}/{}", base, path), false)
            .await
            .unwrap_err();
        match err {
            ScrapeError::RateLimited { status, .. } => assert_eq!(status, expected),
            other => panic!("expected rate limit for {}, got {:?}", path, other),
        }
    }
}

#[tokio::test]
async fn test_other_error_status_still_parsed() {
    let (pipelines, base) = setup().await;
    let result = pipelines
        .extract_from_web(&format!("{}/missing", base), false)
        .await
        .unwrap();
    assert_eq!(result.text, "not here");
}

#[tokio::test]
async fn test_preprocess_uses_boilerplate_free_text() {
    let (pipelines, base) = setup().await;
    let result = pipelines
        .extract_from_web(&format!("{}/article", base), true)
        .await
        .unwrap();

    // Raw text still holds every paragraph, footer included.
    assert!(result.text.contains("Join our newsletter"));

    let pre = result.preprocessed.unwrap();
    let clean = pre.clean_text.unwrap();
    assert!(clean.contains("Every value in Rust has exactly one owner."));
    assert!(!clean.contains("Home"));
    assert!(pre
        .sentences
        .iter()
        .any(|s| s.ends_with("exactly one owner.")));
    assert!(!pre.chunks.is_empty());
    assert!(pre.words.contains(&"Rust".to_string()));
}

#[tokio::test]
async fn test_images_resolved_against_page() {
    let (pipelines, base) = setup().await;
    let images = pipelines
        .extract_images(&format!("{}/gallery/index.html", base))
        .await
        .unwrap();
    assert_eq!(
        images,
        vec![
            format!("{}/gallery/a.png", base),
            format!("{}/static/b.jpg", base),
        ]
    );
}

#[tokio::test]
async fn test_client_records_history() {
    let base = common::spawn_server(app()).await;
    let client = HttpClient::builder(Duration::from_secs(5)).build().unwrap();

    let response = client.get(&format!("{}/hop/2", base)).await.unwrap();
    assert_eq!(response.redirect_count(), 2);
    assert_eq!(response.history[0].status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.url.path(), "/hop/0");
    assert!(check_redirects(&response).safe);
}

/// Records the page URL each cleaning call was keyed on.
#[derive(Default)]
struct RecordingRemover {
    urls: Mutex<Vec<String>>,
}

impl BoilerplateRemover for RecordingRemover {
    fn clean(&self, html: &str, url: &Url) -> Result<String, ScrapeError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(html.len().to_string())
    }
}

#[tokio::test]
async fn test_boilerplate_keyed_on_final_url() {
    let base = common::spawn_server(app()).await;
    let remover = Arc::new(RecordingRemover::default());
    let mut components = Components::from_config(&Config::default()).unwrap();
    components.boilerplate = remover.clone();
    let pipelines = Pipelines::from_components(components, SummaryOptions::default());

    let result = pipelines
        .extract_from_web(&format!("{}/hop/2", base), true)
        .await
        .unwrap();
    assert_eq!(result.source, format!("{}/hop/2", base));
    assert_eq!(
        remover.urls.lock().unwrap().as_slice(),
        [format!("{}/hop/0", base)]
    );
    assert!(result.preprocessed.unwrap().clean_text.is_some());
}

#[tokio::test]
async fn test_user_agent_default_and_configured() {
    let (pipelines, base) = setup().await;
    let url = format!("{}/ua", base);
    let result = pipelines.extract_from_web(&url, false).await.unwrap();
    assert_eq!(result.text, echosift::http_client::USER_AGENT);

    let mut config = Config::default();
    config.scraper.user_agent = Some("EchoSift/0.1".to_string());
    let custom = Pipelines::from_config(&config).unwrap();
    let result = custom.extract_from_web(&url, false).await.unwrap();
    assert_eq!(result.text, "EchoSift/0.1");
}
