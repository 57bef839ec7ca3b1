//! Resilient HTTP fetching for the Steam Web API and SteamSpy.
//!
//! # Features
//!
//! - Query-string GET requests decoded as JSON
//! - Unbounded retry on transport failures and empty/unparseable bodies
//! - Per-host request pacing
//! - Optional connect/read timeouts (none by default)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use steamscore_core::fetch::{JsonFetcher, RateLimiter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = JsonFetcher::new(Arc::new(RateLimiter::from_millis(1000)))?;
//! let json = fetcher
//!     .fetch_json("https://steamspy.com/api.php", &[("request", "appdetails"), ("appid", "620")])
//!     .await?;
//! println!("{}", json["name"]);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod rate_limiter;
mod retry;

pub use client::{FetcherConfig, JsonFetcher};
pub use error::FetchError;
pub use rate_limiter::{DEFAULT_RATE_LIMIT_MS, RateLimiter};
pub use retry::{
    Delay, EMPTY_RESPONSE_WAIT, RetryWait, TRANSPORT_COUNTDOWN_SECS, TokioDelay, TransientFailure,
};
