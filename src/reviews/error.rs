//! Error types for review lookups.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors raised while fetching review statistics for one app.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The response was JSON but lacked the vote counts.
    #[error("malformed review data for app {appid}: {source}")]
    MalformedResponse {
        /// The app that was looked up.
        appid: u32,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be issued at all.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ReviewError {
    /// Creates a malformed response error.
    pub fn malformed(appid: u32, source: serde_json::Error) -> Self {
        Self::MalformedResponse { appid, source }
    }
}
