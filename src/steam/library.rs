//! Owned-games listing via `IPlayerService/GetOwnedGames`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::{SteamApi, SteamError, SteamId};

const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";

/// One title in the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    /// Steam app ID.
    pub appid: u32,
    /// Total minutes played under this account.
    pub playtime_forever: u64,
}

impl SteamApi {
    /// Lists the games owned by `steam_id`, free-to-play titles included.
    ///
    /// Order matches the API response.
    ///
    /// # Errors
    ///
    /// - [`SteamError::EmptyOrPrivateLibrary`] when the response has no `games` array
    /// - [`SteamError::MalformedResponse`] when an entry lacks `appid` or `playtime_forever`
    /// - [`SteamError::Fetch`] when the request cannot be built
    #[instrument(skip(self), fields(%steam_id))]
    pub async fn owned_games(&self, steam_id: SteamId) -> Result<Vec<OwnedGame>, SteamError> {
        let steam_id_text = steam_id.to_string();
        let json = self
            .fetcher
            .fetch_json(
                &self.endpoint(OWNED_GAMES_PATH),
                &[
                    ("key", self.api_key.as_str()),
                    ("steamid", steam_id_text.as_str()),
                    ("include_played_free_games", "true"),
                    ("format", "json"),
                ],
            )
            .await?;

        let games = parse_owned_games(json, steam_id)?;
        info!(count = games.len(), "fetched owned games");
        Ok(games)
    }
}

fn parse_owned_games(mut json: Value, steam_id: SteamId) -> Result<Vec<OwnedGame>, SteamError> {
    let Some(games) = json
        .pointer_mut("/response/games")
        .filter(|games| games.is_array())
    else {
        return Err(SteamError::EmptyOrPrivateLibrary { steam_id });
    };
    serde_json::from_value(games.take()).map_err(|source| SteamError::malformed("GetOwnedGames", source))
}
