use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use steamscore_core::output::{non_zero_path, primary_path};
use steamscore_core::{
    EnrichedRecord, FetcherConfig, JsonFetcher, RateLimiter, SteamApi, SteamId, SteamSpyClient,
    enrich, filter_and_sort, write_records,
};
use tracing::{debug, info};

use crate::app::progress_manager::EnrichProgressBar;
use crate::app::config_runtime;
use crate::app::terminal::TerminalProfile;
use crate::cli::Args;

/// Everything one export run needs, after config merging.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) steam_input: String,
    pub(crate) api_key: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) rate_limit_ms: u64,
    pub(crate) non_zero: bool,
    pub(crate) show_progress: bool,
    pub(crate) fetcher: FetcherConfig,
    pub(crate) steam_api_url: Option<String>,
    pub(crate) steamspy_url: Option<String>,
}

impl RunSettings {
    pub(crate) fn from_args(
        args: &Args,
        api_key: String,
        fetcher: FetcherConfig,
        terminal: TerminalProfile,
    ) -> Self {
        Self {
            steam_input: args.steam_id.clone(),
            api_key,
            output_dir: config_runtime::resolve_output_dir(args),
            rate_limit_ms: args.rate_limit,
            non_zero: args.non_zero,
            show_progress: terminal.progress,
            fetcher,
            steam_api_url: args.steam_api_url.clone(),
            steamspy_url: args.steamspy_url.clone(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub(crate) struct RunSummary {
    pub(crate) steam_id: SteamId,
    pub(crate) games: usize,
    pub(crate) zero_scores: usize,
    pub(crate) primary: PathBuf,
    pub(crate) non_zero: Option<PathBuf>,
}

pub(crate) async fn run_export(settings: RunSettings) -> Result<RunSummary> {
    let rate_limiter = Arc::new(RateLimiter::from_millis(settings.rate_limit_ms));
    let fetcher = Arc::new(
        JsonFetcher::with_config(settings.fetcher, rate_limiter)
            .context("Failed to build HTTP client")?,
    );

    let steam = match &settings.steam_api_url {
        Some(url) => SteamApi::with_base_url(Arc::clone(&fetcher), &settings.api_key, url),
        None => SteamApi::new(Arc::clone(&fetcher), &settings.api_key),
    };
    let reviews = match &settings.steamspy_url {
        Some(url) => SteamSpyClient::with_api_url(Arc::clone(&fetcher), url),
        None => SteamSpyClient::new(Arc::clone(&fetcher)),
    };

    let steam_id = steam
        .resolve_steam_id(&settings.steam_input)
        .await
        .with_context(|| format!("Could not resolve a Steam ID from '{}'", settings.steam_input))?;
    info!(%steam_id, "Steam ID resolved");

    let games = steam
        .owned_games(steam_id)
        .await
        .with_context(|| format!("Could not list the games of {steam_id}"))?;
    info!(count = games.len(), "Getting games info...");

    let progress = EnrichProgressBar::new(settings.show_progress, games.len());
    let records = enrich(&games, &reviews, |p| progress.update(p)).await;
    progress.finish();
    let records = records.context("Review lookup failed")?;

    if !settings.output_dir.exists() {
        fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                settings.output_dir.display()
            )
        })?;
        info!(dir = %settings.output_dir.display(), "Created output directory");
    }

    let primary = primary_path(&settings.output_dir, steam_id);
    write_records(&records, &primary)
        .with_context(|| format!("Failed to write '{}'", primary.display()))?;
    info!(path = %primary.display(), "Wrote games file");

    let non_zero = if settings.non_zero {
        let target = filter_and_sort(&primary).with_context(|| {
            format!(
                "Failed to write '{}'",
                non_zero_path(&settings.output_dir, steam_id).display()
            )
        })?;
        Some(target)
    } else {
        debug!("non-zero file not requested");
        None
    };

    let summary = RunSummary {
        steam_id,
        games: records.len(),
        zero_scores: count_zero_scores(&records),
        primary,
        non_zero,
    };
    log_summary(&summary);
    Ok(summary)
}

#[allow(clippy::float_cmp)]
fn count_zero_scores(records: &[EnrichedRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.review_score_percent == 0.0)
        .count()
}

fn log_summary(summary: &RunSummary) {
    info!(
        steam_id = %summary.steam_id,
        games = summary.games,
        zero_scores = summary.zero_scores,
        primary = %summary.primary.display(),
        non_zero = summary.non_zero.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
        "Export complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64) -> EnrichedRecord {
        EnrichedRecord {
            display_name: "g".to_string(),
            review_score_percent: score,
            genre: String::new(),
            hours_played: 0.0,
        }
    }

    #[test]
    fn test_count_zero_scores() {
        let records = [record(0.0), record(12.5), record(0.0), record(100.0)];
        assert_eq!(count_zero_scores(&records), 2);
        assert_eq!(count_zero_scores(&[]), 0);
    }
}
