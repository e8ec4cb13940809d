//! Live badge values fetched from a user-supplied URL.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Longest live value shown on a badge, in characters.
pub const MAX_LIVE_VALUE_CHARS: usize = 64;

/// Most body bytes read from a value source. The rest is never downloaded.
const MAX_BODY_BYTES: usize = 4 * 1024;

/// Why a live value could not be used.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),
    #[error("response is {0}, not text")]
    NotText(String),
    #[error("response body is not UTF-8")]
    NotUtf8,
    #[error("response body is empty")]
    Empty,
}

/// One-shot HTTP client for live values.
///
/// Every request is bounded by the timeout the client was built with and is
/// attempted exactly once.
#[derive(Clone)]
pub struct ValueFetcher {
    client: reqwest::Client,
}

impl ValueFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch the text at `url`, or `None` if anything goes wrong.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(value) => {
                debug!(url = %url, "Fetched live badge value");
                Some(value)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Live badge value unavailable, using stored value");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // A missing content type is accepted as text.
        if let Some(content_type) = response.headers().get(CONTENT_TYPE)
            && !content_type.to_str().is_ok_and(is_text)
        {
            return Err(FetchError::NotText(
                String::from_utf8_lossy(content_type.as_bytes()).into_owned(),
            ));
        }

        let mut body = Vec::new();
        while body.len() < MAX_BODY_BYTES {
            let Some(chunk) = response.chunk().await? else {
                break;
            };
            body.extend_from_slice(&chunk);
        }
        body.truncate(MAX_BODY_BYTES);

        let text = utf8_prefix(&body).ok_or(FetchError::NotUtf8)?;
        normalize(text).ok_or(FetchError::Empty)
    }
}

/// Whether a `Content-Type` value names a `text/*` media type.
fn is_text(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..5)
        .is_some_and(|kind| kind.eq_ignore_ascii_case("text/"))
}

/// Decode a body prefix, dropping a character split by the byte cap.
fn utf8_prefix(bytes: &[u8]) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) if e.error_len().is_none() => bytes
            .get(..e.valid_up_to())
            .and_then(|valid| std::str::from_utf8(valid).ok()),
        Err(_) => None,
    }
}

/// Trim surrounding whitespace and cap the length. Blank text is unusable.
fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_LIVE_VALUE_CHARS).collect())
}
