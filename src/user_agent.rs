//! Shared User-Agent string for Steam Web API and SteamSpy requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/steamscore";

/// Default User-Agent for every outgoing request.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("steamscore/{version} (library-export; +{PROJECT_UA_URL})")
}
