//! Error types for the Steam Web API adapters.

use thiserror::Error;

use super::SteamId;
use crate::fetch::FetchError;

/// Errors raised while resolving identities or listing owned games.
#[derive(Debug, Error)]
pub enum SteamError {
    /// The input is neither a steam64 ID nor a name the vanity lookup knows.
    #[error(
        "could not resolve '{input}' to a Steam ID; enter a valid steam64 ID, profile URL or vanity name"
    )]
    UnresolvableIdentity {
        /// The raw user input.
        input: String,
    },

    /// The owned-games response carried no `games` array.
    ///
    /// Steam omits the array for private profiles and empty libraries alike.
    #[error("no owned games returned for {steam_id}; the profile may be private or the library empty")]
    EmptyOrPrivateLibrary {
        /// The account whose library was requested.
        steam_id: SteamId,
    },

    /// A response was JSON but did not have the expected shape.
    #[error("malformed {endpoint} response: {source}")]
    MalformedResponse {
        /// Short name of the endpoint.
        endpoint: &'static str,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be issued at all.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SteamError {
    /// Creates an unresolvable identity error.
    pub fn unresolvable(input: impl Into<String>) -> Self {
        Self::UnresolvableIdentity {
            input: input.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(endpoint: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedResponse { endpoint, source }
    }
}
