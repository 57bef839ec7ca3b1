//! Turning user input into a [`SteamId`].
//!
//! Accepted forms:
//! - `76561197960287930` - parsed directly, no request
//! - `https://steamcommunity.com/id/<vanity>/` - last path segment looked up
//! - `https://steamcommunity.com/profiles/<steam64>` - parsed directly
//! - `<vanity>` - looked up via `ISteamUser/ResolveVanityURL`

use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{SteamApi, SteamError, SteamId};

/// Substring that marks input as a Steam Community profile URL.
pub const PROFILE_URL_MARKER: &str = "steamcommunity";

const RESOLVE_VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v0001/";

/// What the raw input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityInput {
    /// Already a steam64 ID.
    SteamId(SteamId),
    /// A vanity name that needs the lookup endpoint.
    Vanity(String),
}

/// Classifies raw input without touching the network.
///
/// # Errors
///
/// Returns [`SteamError::UnresolvableIdentity`] for empty input, a profile URL
/// with no path segment, or a digit string that overflows 64 bits.
///
/// # Examples
///
/// ```
/// use steamscore_core::steam::{IdentityInput, SteamId, classify_input};
///
/// assert_eq!(
///     classify_input("76561197960287930").unwrap(),
///     IdentityInput::SteamId(SteamId::new(76561197960287930))
/// );
/// assert_eq!(
///     classify_input("https://steamcommunity.com/id/gaben/").unwrap(),
///     IdentityInput::Vanity("gaben".to_string())
/// );
/// ```
pub fn classify_input(raw: &str) -> Result<IdentityInput, SteamError> {
    let input = raw.trim();

    if input.contains(PROFILE_URL_MARKER) {
        let path = input.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|segment| !segment.is_empty()).rev();
        let Some(last) = segments.next() else {
            return Err(SteamError::unresolvable(raw));
        };
        if segments.next() == Some("profiles") && is_all_digits(last) {
            return parse_numeric(last, raw).map(IdentityInput::SteamId);
        }
        return Ok(IdentityInput::Vanity(last.to_string()));
    }

    if is_all_digits(input) {
        return parse_numeric(input, raw).map(IdentityInput::SteamId);
    }

    if input.is_empty() {
        return Err(SteamError::unresolvable(raw));
    }

    Ok(IdentityInput::Vanity(input.to_string()))
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_numeric(digits: &str, raw: &str) -> Result<SteamId, SteamError> {
    digits
        .parse::<SteamId>()
        .map_err(|_| SteamError::unresolvable(raw))
}

#[derive(Debug, Deserialize)]
struct VanityEnvelope {
    response: VanityResponse,
}

#[derive(Debug, Deserialize)]
struct VanityResponse {
    steamid: Option<String>,
    success: Option<i64>,
    message: Option<String>,
}

impl SteamApi {
    /// Resolves a numeric ID, profile URL or vanity name to a [`SteamId`].
    ///
    /// Digit-only input and `/profiles/<id>` URLs never hit the network.
    ///
    /// # Errors
    ///
    /// Returns [`SteamError::UnresolvableIdentity`] when the lookup response has
    /// no usable `steamid`, or [`SteamError::Fetch`] when the request cannot be
    /// built.
    #[instrument(skip(self))]
    pub async fn resolve_steam_id(&self, raw: &str) -> Result<SteamId, SteamError> {
        match classify_input(raw)? {
            IdentityInput::SteamId(steam_id) => {
                debug!(%steam_id, "input is already a steam64 ID");
                Ok(steam_id)
            }
            IdentityInput::Vanity(vanity) => self.resolve_vanity(&vanity, raw).await,
        }
    }

    async fn resolve_vanity(&self, vanity: &str, raw: &str) -> Result<SteamId, SteamError> {
        debug!(vanity, "resolving vanity name");
        let json = self
            .fetcher
            .fetch_json(
                &self.endpoint(RESOLVE_VANITY_PATH),
                &[("key", self.api_key.as_str()), ("vanityurl", vanity)],
            )
            .await?;

        let Ok(envelope) = serde_json::from_value::<VanityEnvelope>(json) else {
            debug!("vanity response missing `response` object");
            return Err(SteamError::unresolvable(raw));
        };
        let response = envelope.response;

        let Some(steam_id) = response
            .steamid
            .as_deref()
            .and_then(|value| value.parse::<SteamId>().ok())
        else {
            debug!(
                success = ?response.success,
                message = ?response.message,
                "vanity lookup returned no steamid"
            );
            return Err(SteamError::unresolvable(raw));
        };

        info!(vanity, %steam_id, "resolved vanity name");
        Ok(steam_id)
    }
}
