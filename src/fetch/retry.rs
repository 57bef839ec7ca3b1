//! Retry classification and waits for transient fetch failures.
//!
//! Two failure classes are retried, each with its own fixed wait and no
//! attempt cap:
//! - [`TransientFailure::Transport`] - the request never completed (connect,
//!   TLS, timeout, truncated body). Waits with a 5 second countdown.
//! - [`TransientFailure::EmptyResponse`] - the server answered but the body is
//!   empty or not JSON, which is how both upstreams signal throttling.
//!   Waits 10 seconds flat.
//!
//! Waits go through the [`Delay`] trait so callers (and tests) can substitute
//! the clock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use steamscore_core::fetch::{RetryWait, TransientFailure};
//!
//! assert_eq!(
//!     TransientFailure::Transport.wait(),
//!     RetryWait::Countdown { seconds: 5 }
//! );
//! assert_eq!(
//!     TransientFailure::EmptyResponse.wait().total(),
//!     Duration::from_secs(10)
//! );
//! ```

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument};

/// Length of the countdown shown after a transport failure, in seconds.
pub const TRANSPORT_COUNTDOWN_SECS: u64 = 5;

/// Flat wait after an empty or unparseable response.
pub const EMPTY_RESPONSE_WAIT: Duration = Duration::from_secs(10);

/// One countdown step.
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Classification of a failed fetch attempt that will be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientFailure {
    /// The request could not complete at the transport layer.
    Transport,

    /// The server was reachable but returned nothing usable.
    EmptyResponse,
}

impl TransientFailure {
    /// Returns the wait to apply before retrying this failure.
    #[must_use]
    pub fn wait(self) -> RetryWait {
        match self {
            Self::Transport => RetryWait::Countdown {
                seconds: TRANSPORT_COUNTDOWN_SECS,
            },
            Self::EmptyResponse => RetryWait::Flat(EMPTY_RESPONSE_WAIT),
        }
    }
}

/// How long to pause before the next attempt, and how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryWait {
    /// One-second steps with a visible remaining-seconds counter.
    Countdown {
        /// Number of one-second steps.
        seconds: u64,
    },

    /// A single uninterrupted pause.
    Flat(Duration),
}

impl RetryWait {
    /// Total time spent waiting.
    #[must_use]
    pub fn total(self) -> Duration {
        match self {
            Self::Countdown { seconds } => Duration::from_secs(seconds),
            Self::Flat(duration) => duration,
        }
    }

    /// Performs the wait through `delay`, logging as it goes.
    #[instrument(level = "debug", skip(delay))]
    pub async fn run(self, delay: &dyn Delay) {
        match self {
            Self::Countdown { seconds } => {
                for remaining in (1..=seconds).rev() {
                    info!(remaining, "Waiting... ({remaining})");
                    delay.sleep(COUNTDOWN_TICK).await;
                }
            }
            Self::Flat(duration) => {
                info!(
                    wait_secs = duration.as_secs(),
                    "No response, waiting {} seconds...",
                    duration.as_secs()
                );
                delay.sleep(duration).await;
            }
        }
        info!("Retrying.");
    }
}

/// Source of retry pauses.
///
/// Uses `async_trait` so the fetcher can hold a `Box<dyn Delay>`.
#[async_trait]
pub trait Delay: Send + Sync + Debug {
    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Delay`] backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Classifies a `reqwest` error raised while sending or reading a request.
///
/// Builder errors are the caller's fault and are not retried; anything else
/// means the exchange did not complete and counts as a transport failure.
pub(crate) fn classify_send_error(error: &reqwest::Error) -> Option<TransientFailure> {
    if error.is_builder() {
        None
    } else {
        Some(TransientFailure::Transport)
    }
}

/// Checks if a reqwest error is a TLS/certificate error.
pub(crate) fn is_tls_error(error: &reqwest::Error) -> bool {
    let error_string = format!("{error:?}").to_lowercase();
    error_string.contains("certificate")
        || error_string.contains("tls")
        || error_string.contains("ssl")
        || error_string.contains("handshake")
}
