//! steamscore core library
//!
//! Exports a Steam user's owned games together with community review scores
//! as CSV.
//!
//! # Architecture
//!
//! - [`fetch`] - JSON fetcher that retries transient failures without limit
//! - [`steam`] - identity resolution and the owned-games listing
//! - [`reviews`] - per-app review statistics (SteamSpy) and the score rule
//! - [`enrich`] - ordered merge of the library with review statistics
//! - [`output`] - CSV writer and the non-zero filter/sort pass

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod enrich;
pub mod fetch;
pub mod output;
pub mod reviews;
pub mod steam;
mod user_agent;

// Re-export commonly used types
pub use enrich::{EnrichError, EnrichProgress, EnrichedRecord, enrich};
pub use fetch::{FetchError, FetcherConfig, JsonFetcher, RateLimiter};
pub use output::{OutputError, filter_and_sort, write_records};
pub use reviews::{ReviewError, ReviewSource, ReviewStats, SteamSpyClient, review_score_percent};
pub use steam::{OwnedGame, SteamApi, SteamError, SteamId};
