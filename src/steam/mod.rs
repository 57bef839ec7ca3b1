//! Steam Web API adapters: identity resolution and owned-games listing.
//!
//! - [`SteamId`] - canonical 64-bit account identifier
//! - [`SteamApi::resolve_steam_id`] - numeric ID, profile URL or vanity name to [`SteamId`]
//! - [`SteamApi::owned_games`] - the account's library with playtime
//!
//! Both calls go through the shared [`JsonFetcher`], so throttling and flaky
//! connections are absorbed there.

mod error;
mod identity;
mod library;

pub use error::SteamError;
pub use identity::{IdentityInput, PROFILE_URL_MARKER, classify_input};
pub use library::OwnedGame;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::fetch::JsonFetcher;

/// Default Steam Web API base URL.
pub const STEAM_API_BASE_URL: &str = "https://api.steampowered.com";

/// A Steam account's 64-bit identifier ("steam64 ID").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamId(u64);

impl SteamId {
    /// Wraps a raw steam64 value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw steam64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Client for the two Steam Web API endpoints used by a run.
#[derive(Debug, Clone)]
pub struct SteamApi {
    fetcher: Arc<JsonFetcher>,
    api_key: String,
    base_url: String,
}

impl SteamApi {
    /// Creates a client against the public Steam Web API.
    #[must_use]
    pub fn new(fetcher: Arc<JsonFetcher>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(fetcher, api_key, STEAM_API_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(
        fetcher: Arc<JsonFetcher>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
