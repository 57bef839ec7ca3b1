//! Resilient JSON-over-HTTP fetcher.
//!
//! [`JsonFetcher::fetch_json`] issues a GET and keeps repeating it until the
//! server hands back a body that parses as JSON. Transport failures and empty
//! or unparseable responses are retried without limit (see
//! [`TransientFailure`]); every other outcome, including non-2xx statuses
//! carrying JSON, is returned untouched.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::FetchError;
use super::rate_limiter::{RateLimiter, extract_host};
use super::retry::{Delay, TokioDelay, TransientFailure, classify_send_error, is_tls_error};
use crate::user_agent;

/// Optional HTTP timeouts. Both default to `None`: no timeout at all.
///
/// When set, an expired timeout is a transport failure and is retried like
/// any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout, including reading the body.
    pub read_timeout: Option<Duration>,
}

/// JSON fetcher with unbounded retry on transient failures.
///
/// Create one per run and share it between the Steam and SteamSpy adapters;
/// it holds the connection pool and the per-host pacing state.
#[derive(Debug)]
pub struct JsonFetcher {
    client: Client,
    rate_limiter: Arc<RateLimiter>,
    delay: Box<dyn Delay>,
}

/// Why a single attempt did not produce a JSON value.
enum AttemptFailure {
    Transient(TransientFailure),
    Terminal(FetchError),
}

impl JsonFetcher {
    /// Creates a fetcher with no timeouts and real-time waits.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] when the HTTP client cannot be built.
    pub fn new(rate_limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_config(FetcherConfig::default(), rate_limiter)
    }

    /// Creates a fetcher with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] when the HTTP client cannot be built.
    #[instrument(level = "debug", skip(rate_limiter))]
    pub fn with_config(
        config: FetcherConfig,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(user_agent::default_user_agent())
            .gzip(true);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.read_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::client)?;

        Ok(Self {
            client,
            rate_limiter,
            delay: Box::new(TokioDelay),
        })
    }

    /// Replaces the source of retry waits.
    #[must_use]
    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Fetches `url` with `query` appended and returns the decoded JSON body.
    ///
    /// Retries forever on transport failures (5 second countdown) and on empty
    /// or non-JSON bodies (10 second wait). The HTTP status is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] only when the request cannot be constructed.
    #[instrument(skip(self, query), fields(host = %extract_host(url)))]
    pub async fn fetch_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, FetchError> {
        let request_url =
            Url::parse_with_params(url, query.iter()).map_err(|_| FetchError::invalid_url(url))?;

        let mut attempt: u64 = 1;
        loop {
            self.rate_limiter.acquire(request_url.as_str()).await;
            debug!(attempt, path = request_url.path(), "sending request");

            match self.attempt(&request_url).await {
                Ok(value) => return Ok(value),
                Err(AttemptFailure::Terminal(error)) => return Err(error),
                Err(AttemptFailure::Transient(failure)) => {
                    failure.wait().run(self.delay.as_ref()).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, url: &Url) -> Result<Value, AttemptFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| send_failure(url, error))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| send_failure(url, error))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            warn!(
                path = url.path(),
                status = status.as_u16(),
                "empty response (likely throttled)"
            );
            return Err(AttemptFailure::Transient(TransientFailure::EmptyResponse));
        }

        serde_json::from_slice(&body).map_err(|error| {
            warn!(
                path = url.path(),
                status = status.as_u16(),
                bytes = body.len(),
                error = %error,
                "response body is not JSON (likely throttled)"
            );
            AttemptFailure::Transient(TransientFailure::EmptyResponse)
        })
    }
}

fn send_failure(url: &Url, error: reqwest::Error) -> AttemptFailure {
    // reqwest renders the full URL, API key included
    let error = error.without_url();
    match classify_send_error(&error) {
        Some(failure) => {
            if is_tls_error(&error) {
                warn!(path = url.path(), error = %error, "SSL error");
            } else {
                warn!(path = url.path(), error = %error, "network error");
            }
            AttemptFailure::Transient(failure)
        }
        None => AttemptFailure::Terminal(FetchError::request(redacted(url), error)),
    }
}

/// Renders a URL without its query string, which carries the API key.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
