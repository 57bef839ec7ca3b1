//! Error types for the fetch module.
//!
//! Transient conditions never show up here: the fetcher absorbs them in its
//! retry loop. What remains are failures no amount of retrying can fix.

use thiserror::Error;

/// Terminal errors returned by [`JsonFetcher`](super::JsonFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL (or its query parameters) could not be turned into a request.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The URL as supplied by the caller.
        url: String,
    },

    /// The request was rejected while being built, before any I/O.
    #[error("could not build request for {url}: {source}")]
    Request {
        /// The URL of the request.
        url: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client construction failed: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a request construction error.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    /// Creates a client construction error.
    pub fn client(source: reqwest::Error) -> Self {
        Self::Client { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display_names_url() {
        let error = FetchError::invalid_url("not a url");
        assert_eq!(error.to_string(), "invalid URL: not a url");
    }
}
