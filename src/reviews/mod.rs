//! Community review statistics per app.
//!
//! - [`ReviewSource`] - async trait the enrichment pipeline consumes
//! - [`SteamSpyClient`] - production source backed by the SteamSpy API
//! - [`review_score_percent`] - positive share of votes, two decimals

mod error;
mod score;
mod steamspy;

pub use error::ReviewError;
pub use score::{review_score_percent, round_to_hundredths};
pub use steamspy::{STEAMSPY_API_URL, SteamSpyClient};

use async_trait::async_trait;

/// Vote counts and descriptive fields for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStats {
    /// Steam app ID.
    pub appid: u32,
    /// Positive review count.
    pub positive: u64,
    /// Negative review count.
    pub negative: u64,
    /// Display name; empty when the source has none.
    pub name: String,
    /// Genre list as reported (e.g. `"Action, Indie"`); may be empty.
    pub genre: String,
}

impl ReviewStats {
    /// Derived review percentage, see [`review_score_percent`].
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        review_score_percent(self.positive, self.negative)
    }
}

/// A provider of [`ReviewStats`] keyed by app ID.
///
/// Uses `async_trait` so the pipeline can take `&dyn ReviewSource` and tests
/// can substitute a fixed table.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetches the statistics for `appid`.
    async fn review_stats(&self, appid: u32) -> Result<ReviewStats, ReviewError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_percent_uses_vote_counts() {
        let stats = ReviewStats {
            appid: 10,
            positive: 8,
            negative: 2,
            name: "X".to_string(),
            genre: "Indie".to_string(),
        };
        assert!((stats.score_percent() - 80.0).abs() < f64::EPSILON);
    }
}
