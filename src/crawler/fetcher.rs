//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The [`Fetcher`] contract the coordinator fetches through
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Retry logic for transient failures
//! - Error classification

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client};
use std::time::Duration;

/// Per-request settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: UserAgentConfig::default().header_value(),
        }
    }
}

/// Retrieves the HTML of a page
///
/// Implementations return the response body on success. Every failure is a
/// [`FetchError`]; none of them ends the crawl.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetcher` - Timeouts for the client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    let connect_timeout = Duration::from_millis(fetcher.timeout_ms.min(10_000));

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_millis(fetcher.timeout_ms))
        .connect_timeout(connect_timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Direct HTTP fetcher with basic retry
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx with HTML | Return body |
/// | HTTP 2xx, other Content-Type | Immediate → NotHtml |
/// | HTTP 404 and other 4xx | Immediate → Status |
/// | HTTP 429 | Retry with backoff |
/// | HTTP 5xx | Retry with backoff |
/// | Timeout | Retry with backoff |
/// | Connection error | Retry with backoff |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(user_agent: &UserAgentConfig, config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, config)?;
        Ok(Self::with_client(
            client,
            config.max_retries,
            Duration::from_millis(config.retry_backoff_ms),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, max_retries: u32, retry_backoff: Duration) -> Self {
        Self {
            client,
            max_retries,
            retry_backoff,
        }
    }

    /// The underlying client, shared with relay fetchers
    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn fetch_once(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .header(header::USER_AGENT, options.user_agent.as_str())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(url, e))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url, options).await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let pause = self.retry_backoff * attempt;
                    tracing::debug!(
                        "Retrying {} in {:?} (attempt {}/{}): {}",
                        url,
                        pause,
                        attempt,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(pause).await;
                }
                result => return result,
            }
        }
    }

    fn name(&self) -> &str {
        "direct"
    }
}

/// Maps a reqwest failure onto the fetch error taxonomy
pub(crate) fn classify_reqwest_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Returns true for `text/html` and `application/xhtml+xml`
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.contains("text/html") || lower.contains("application/xhtml+xml")
}

/// Returns true if a body plausibly is an HTML document
///
/// Relay services sometimes answer with an error page in JSON or plain text
/// while still returning 200, so each attempt is checked before it is trusted.
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body
        .trim_start()
        .chars()
        .take(2048)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html")
        || head.contains("<html")
        || head.contains("<head")
        || head.contains("<body")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(max_retries: u32) -> HttpFetcher {
        let config = FetcherConfig {
            timeout_ms: 2_000,
            max_retries,
            retry_backoff_ms: 10,
            proxies: Vec::new(),
        };
        HttpFetcher::new(&UserAgentConfig::default(), &config).unwrap()
    }

    fn options() -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(2),
            user_agent: "TestGleaner/1.0".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type("image/png"));
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<!DOCTYPE html><html><body></body></html>"));
        assert!(looks_like_html("\n  <html lang=\"en\">"));
        assert!(looks_like_html("<body><p>fragment</p></body>"));
        assert!(!looks_like_html("{\"error\": \"rate limited\"}"));
        assert!(!looks_like_html("Service unavailable"));
        assert!(!looks_like_html(""));
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header_matcher("user-agent", "TestGleaner/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>ok</body></html>", "text/html; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body = test_fetcher(0)
            .fetch(&format!("{}/page", server.uri()), &options())
            .await
            .unwrap();
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_fetch_404_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_fetcher(3)
            .fetch(&format!("{}/missing", server.uri()), &options())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_5xx_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let err = test_fetcher(2)
            .fetch(&format!("{}/flaky", server.uri()), &options())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let err = test_fetcher(0)
            .fetch(&format!("{}/data", server.uri()), &options())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotHtml { .. }));
    }
}
