//! SteamSpy `appdetails` lookups.
//!
//! SteamSpy API: `https://steamspy.com/api.php?request=appdetails&appid={appid}`
//! Returns: `{ "appid": 620, "name": "Portal 2", "positive": 1, "negative": 2, "genre": "Action, Adventure", ... }`
//! Rate limit: ~1 request/second. There is no batch form.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ReviewError, ReviewSource, ReviewStats};
use crate::fetch::JsonFetcher;

/// Default SteamSpy endpoint.
pub const STEAMSPY_API_URL: &str = "https://steamspy.com/api.php";

/// The subset of the `appdetails` payload we keep.
///
/// Vote counts are required; SteamSpy sends `"name": null` for apps it does
/// not track, so the text fields are optional.
#[derive(Debug, Deserialize)]
struct AppDetails {
    positive: u64,
    negative: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    genre: Option<String>,
}

/// [`ReviewSource`] backed by SteamSpy.
#[derive(Debug, Clone)]
pub struct SteamSpyClient {
    fetcher: Arc<JsonFetcher>,
    api_url: String,
}

impl SteamSpyClient {
    /// Creates a client against the public SteamSpy API.
    #[must_use]
    pub fn new(fetcher: Arc<JsonFetcher>) -> Self {
        Self::with_api_url(fetcher, STEAMSPY_API_URL)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    #[must_use]
    pub fn with_api_url(fetcher: Arc<JsonFetcher>, api_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl ReviewSource for SteamSpyClient {
    #[instrument(skip(self))]
    async fn review_stats(&self, appid: u32) -> Result<ReviewStats, ReviewError> {
        let appid_text = appid.to_string();
        let json = self
            .fetcher
            .fetch_json(
                &self.api_url,
                &[("request", "appdetails"), ("appid", appid_text.as_str())],
            )
            .await?;

        let details: AppDetails =
            serde_json::from_value(json).map_err(|source| ReviewError::malformed(appid, source))?;
        debug!(
            positive = details.positive,
            negative = details.negative,
            "fetched review counts"
        );

        Ok(ReviewStats {
            appid,
            positive: details.positive,
            negative: details.negative,
            name: details.name.unwrap_or_default(),
            genre: details.genre.unwrap_or_default(),
        })
    }
}
