//! Integration tests for identity resolution and the owned-games listing.

mod support;

use std::sync::Arc;

use serde_json::json;
use steamscore_core::fetch::{JsonFetcher, RateLimiter};
use steamscore_core::{OwnedGame, SteamApi, SteamError, SteamId};
use support::socket_guard::start_mock_server_or_skip;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VANITY_PATH: &str = "/ISteamUser/ResolveVanityURL/v0001/";
const OWNED_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";
const GABEN: SteamId = SteamId::new(76_561_197_960_287_930);

fn api(server: &MockServer) -> SteamApi {
    let fetcher = JsonFetcher::new(Arc::new(RateLimiter::disabled())).unwrap();
    SteamApi::with_base_url(Arc::new(fetcher), "TESTKEY", server.uri())
}

#[tokio::test]
async fn test_numeric_input_makes_no_request() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let steam_id = api(&server)
        .resolve_steam_id("76561197960287930")
        .await
        .unwrap();

    assert_eq!(steam_id, GABEN);
}

#[tokio::test]
async fn test_vanity_name_resolves_through_lookup() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(VANITY_PATH))
        .and(query_param("key", "TESTKEY"))
        .and(query_param("vanityurl", "gabelogannewell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"steamid": "76561197960287930", "success": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let steam_id = api(&server)
        .resolve_steam_id("gabelogannewell")
        .await
        .unwrap();

    assert_eq!(steam_id, GABEN);
}

#[tokio::test]
async fn test_profile_url_looks_up_final_segment() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(VANITY_PATH))
        .and(query_param("vanityurl", "gabelogannewell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"steamid": "76561197960287930", "success": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let steam_id = api(&server)
        .resolve_steam_id("https://steamcommunity.com/id/gabelogannewell/")
        .await
        .unwrap();

    assert_eq!(steam_id, GABEN);
}

#[tokio::test]
async fn test_unknown_vanity_is_unresolvable() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(VANITY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"success": 42, "message": "No match"}
        })))
        .mount(&server)
        .await;

    let result = api(&server).resolve_steam_id("nobody-here").await;

    match result {
        Err(SteamError::UnresolvableIdentity { input }) => assert_eq!(input, "nobody-here"),
        other => panic!("expected UnresolvableIdentity, got {other:?}"),
    }
}

#[tokio::test]
async fn test_owned_games_lists_library_in_response_order() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(OWNED_PATH))
        .and(query_param("key", "TESTKEY"))
        .and(query_param("steamid", "76561197960287930"))
        .and(query_param("include_played_free_games", "true"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "game_count": 3,
                "games": [
                    {"appid": 440, "playtime_forever": 6000},
                    {"appid": 10, "playtime_forever": 120},
                    {"appid": 570, "playtime_forever": 0}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let games = api(&server).owned_games(GABEN).await.unwrap();

    assert_eq!(
        games,
        vec![
            OwnedGame { appid: 440, playtime_forever: 6000 },
            OwnedGame { appid: 10, playtime_forever: 120 },
            OwnedGame { appid: 570, playtime_forever: 0 },
        ]
    );
}

#[tokio::test]
async fn test_private_library_is_reported_without_retry() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(OWNED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = api(&server).owned_games(GABEN).await;

    assert!(matches!(
        result,
        Err(SteamError::EmptyOrPrivateLibrary { steam_id }) if steam_id == GABEN
    ));
}
