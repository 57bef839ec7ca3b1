//! Per-host request pacing.
//!
//! SteamSpy documents a limit of roughly one request per second and the Steam
//! Web API throttles bursts, so the fetcher waits on a [`RateLimiter`] before
//! every attempt. Pacing is tracked per host: Steam and SteamSpy calls do not
//! hold each other up.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use steamscore_core::fetch::RateLimiter;
//!
//! # async fn example() {
//! let limiter = RateLimiter::new(Duration::from_secs(1));
//!
//! // First request to a host proceeds immediately
//! limiter.acquire("https://steamspy.com/api.php").await;
//!
//! // Second request to the same host waits out the remainder of the second
//! limiter.acquire("https://steamspy.com/api.php").await;
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Warning threshold for cumulative pacing delay per host.
const CUMULATIVE_DELAY_WARNING_THRESHOLD: Duration = Duration::from_secs(300);

/// Default minimum spacing between requests to one host.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// Minimum-interval limiter keyed by host.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum delay between requests to the same host.
    delay: Duration,

    /// Whether pacing is disabled (`--rate-limit 0`).
    disabled: bool,

    /// Per-host state. The `Arc` lets the map shard lock drop before awaiting.
    hosts: DashMap<String, Arc<HostState>>,
}

#[derive(Debug)]
struct HostState {
    /// `None` until the first request to this host.
    last_request: Mutex<Option<Instant>>,

    /// Total pacing delay applied to this host, in milliseconds.
    cumulative_delay_ms: AtomicU64,

    /// Set once the cumulative warning has been logged.
    warned: AtomicBool,
}

impl HostState {
    fn new() -> Self {
        Self {
            last_request: Mutex::new(None),
            cumulative_delay_ms: AtomicU64::new(0),
            warned: AtomicBool::new(false),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_cumulative_delay(&self, delay: Duration) -> Duration {
        let delay_ms = delay.as_millis() as u64;
        let total = self
            .cumulative_delay_ms
            .fetch_add(delay_ms, Ordering::SeqCst)
            + delay_ms;
        Duration::from_millis(total)
    }
}

impl RateLimiter {
    /// Creates a limiter enforcing `delay` between requests to one host.
    #[must_use]
    #[instrument(skip_all, fields(delay_ms = delay.as_millis()))]
    pub fn new(delay: Duration) -> Self {
        debug!("creating rate limiter");
        Self {
            delay,
            disabled: delay.is_zero(),
            hosts: DashMap::new(),
        }
    }

    /// Creates a limiter that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
            disabled: true,
            hosts: DashMap::new(),
        }
    }

    /// Creates a limiter from a millisecond setting, where 0 disables pacing.
    #[must_use]
    pub fn from_millis(delay_ms: u64) -> Self {
        if delay_ms == 0 {
            Self::disabled()
        } else {
            Self::new(Duration::from_millis(delay_ms))
        }
    }

    /// Returns whether pacing is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the configured minimum spacing.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until a request to `url`'s host is allowed, then records it.
    #[instrument(level = "debug", skip(self), fields(host))]
    pub async fn acquire(&self, url: &str) {
        if self.disabled {
            return;
        }

        let host = extract_host(url);
        tracing::Span::current().record("host", host.as_str());

        let state = self
            .hosts
            .entry(host.clone())
            .or_insert_with(|| Arc::new(HostState::new()))
            .clone();

        let mut last_request = state.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                let wait = self.delay.saturating_sub(elapsed);
                let cumulative = state.add_cumulative_delay(wait);

                debug!(
                    host = %host,
                    delay_ms = wait.as_millis(),
                    cumulative_ms = cumulative.as_millis(),
                    "applying rate limit delay"
                );

                if cumulative >= CUMULATIVE_DELAY_WARNING_THRESHOLD
                    && !state.warned.swap(true, Ordering::SeqCst)
                {
                    warn!(
                        host = %host,
                        cumulative_delay_secs = cumulative.as_secs(),
                        "request pacing has added over five minutes for this host"
                    );
                }

                tokio::time::sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

/// Extracts the lower-cased host from a URL, or `"unknown"` when it has none.
///
/// # Examples
///
/// ```
/// use steamscore_core::fetch::rate_limiter::extract_host;
///
/// assert_eq!(extract_host("https://SteamSpy.com/api.php"), "steamspy.com");
/// assert_eq!(extract_host("http://127.0.0.1:8080/x"), "127.0.0.1");
/// assert_eq!(extract_host("not a url"), "unknown");
/// ```
#[must_use]
pub fn extract_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| "unknown".to_string())
}
