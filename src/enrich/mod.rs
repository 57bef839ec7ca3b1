//! Merging owned games with their review statistics.
//!
//! [`enrich`] walks the library in order, asks the [`ReviewSource`] about each
//! app, and builds one [`EnrichedRecord`] per game. Lookups run one after the
//! other; progress is reported at each 10% boundary.

mod progress;

pub use progress::{EnrichProgress, ProgressTracker};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::reviews::{ReviewError, ReviewSource, ReviewStats, round_to_hundredths};
use crate::steam::OwnedGame;

/// One output row: an owned game with its review score and genre.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Game name as reported by the review source.
    pub display_name: String,
    /// Positive review share, 0-100, two decimals.
    pub review_score_percent: f64,
    /// Genre list; may be empty.
    pub genre: String,
    /// Playtime in hours, two decimals.
    pub hours_played: f64,
}

impl EnrichedRecord {
    /// Combines a library entry with its review statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_parts(game: &OwnedGame, stats: &ReviewStats) -> Self {
        Self {
            display_name: stats.name.clone(),
            review_score_percent: stats.score_percent(),
            genre: stats.genre.clone(),
            hours_played: round_to_hundredths(game.playtime_forever as f64 / 60.0),
        }
    }
}

/// Errors raised by [`enrich`].
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The review lookup for one app failed; the run stops there.
    #[error("review lookup failed for app {appid}: {source}")]
    Lookup {
        /// The app whose lookup failed.
        appid: u32,
        /// The underlying lookup error.
        #[source]
        source: ReviewError,
    },
}

/// Enriches every game in `games`, in order.
///
/// `on_progress` is invoked at each 10% boundary; it only observes.
///
/// # Errors
///
/// Returns [`EnrichError::Lookup`] for the first app whose statistics could
/// not be obtained. No partial result is returned.
#[instrument(skip_all, fields(total = games.len()))]
pub async fn enrich<F>(
    games: &[OwnedGame],
    source: &dyn ReviewSource,
    mut on_progress: F,
) -> Result<Vec<EnrichedRecord>, EnrichError>
where
    F: FnMut(EnrichProgress),
{
    let mut tracker = ProgressTracker::new(games.len());
    let mut records = Vec::with_capacity(games.len());

    for (index, game) in games.iter().enumerate() {
        if let Some(progress) = tracker.observe(index) {
            info!(
                percent = progress.percent,
                done = progress.done,
                total = progress.total,
                "{}% of games info gathered",
                progress.percent
            );
            on_progress(progress);
        }

        let stats = source
            .review_stats(game.appid)
            .await
            .map_err(|source| EnrichError::Lookup {
                appid: game.appid,
                source,
            })?;
        records.push(EnrichedRecord::from_parts(game, &stats));
    }

    info!(count = records.len(), "all games enriched");
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Review source answering from a fixed table and recording lookups.
    struct FixedSource {
        stats: HashMap<u32, ReviewStats>,
        calls: Mutex<Vec<u32>>,
    }

    impl FixedSource {
        fn new(entries: &[(u32, u64, u64, &str, &str)]) -> Self {
            let stats = entries
                .iter()
                .map(|&(appid, positive, negative, name, genre)| {
                    (
                        appid,
                        ReviewStats {
                            appid,
                            positive,
                            negative,
                            name: name.to_string(),
                            genre: genre.to_string(),
                        },
                    )
                })
                .collect();
            Self {
                stats,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReviewSource for FixedSource {
        async fn review_stats(&self, appid: u32) -> Result<ReviewStats, ReviewError> {
            self.calls.lock().unwrap().push(appid);
            self.stats.get(&appid).cloned().ok_or_else(|| {
                ReviewError::malformed(
                    appid,
                    serde_json::from_str::<serde_json::Value>("").unwrap_err(),
                )
            })
        }
    }

    fn game(appid: u32, playtime_forever: u64) -> OwnedGame {
        OwnedGame {
            appid,
            playtime_forever,
        }
    }

    #[tokio::test]
    async fn test_enrich_builds_expected_record() {
        let source = FixedSource::new(&[(10, 8, 2, "X", "Indie")]);
        let records = enrich(&[game(10, 120)], &source, |_| {}).await.unwrap();

        assert_eq!(
            records,
            vec![EnrichedRecord {
                display_name: "X".to_string(),
                review_score_percent: 80.0,
                genre: "Indie".to_string(),
                hours_played: 2.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_enrich_preserves_library_order_and_is_repeatable() {
        let source = FixedSource::new(&[
            (30, 0, 0, "Third", ""),
            (10, 5, 0, "First", "Action"),
            (20, 1, 3, "Second", "RPG, Indie"),
        ]);
        let games = [game(10, 59), game(20, 61), game(30, 0)];

        let first = enrich(&games, &source, |_| {}).await.unwrap();
        let second = enrich(&games, &source, |_| {}).await.unwrap();

        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
        assert_eq!(*source.calls.lock().unwrap(), vec![10, 20, 30, 10, 20, 30]);
        assert!((first[0].hours_played - 0.98).abs() < 1e-9);
        assert!((first[1].review_score_percent - 25.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_enrich_reports_each_decile_once() {
        let entries: Vec<_> = (1..=25_u32).map(|id| (id, 1, 1, "g", "")).collect();
        let source = FixedSource::new(&entries);
        let games: Vec<_> = (1..=25_u32).map(|id| game(id, 0)).collect();

        let mut seen = Vec::new();
        enrich(&games, &source, |p| seen.push(p.percent)).await.unwrap();

        assert_eq!(seen, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[tokio::test]
    async fn test_enrich_stops_at_failed_lookup() {
        let source = FixedSource::new(&[(1, 1, 0, "ok", "")]);
        let result = enrich(&[game(1, 0), game(2, 0), game(3, 0)], &source, |_| {}).await;

        assert!(matches!(result, Err(EnrichError::Lookup { appid: 2, .. })));
        assert_eq!(*source.calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_enrich_empty_library_yields_no_records() {
        let source = FixedSource::new(&[]);
        let mut seen = Vec::new();
        let records = enrich(&[], &source, |p| seen.push(p)).await.unwrap();
        assert!(records.is_empty());
        assert!(seen.is_empty());
    }
}
