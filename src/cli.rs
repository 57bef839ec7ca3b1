//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use steamscore_core::fetch::DEFAULT_RATE_LIMIT_MS;

/// Export a Steam library with review scores.
///
/// Resolves a Steam ID, profile URL or vanity name, lists the owned games,
/// looks each one up on SteamSpy, and writes `<steamid>_games.csv`.
#[derive(Parser, Debug, Clone)]
#[command(name = "steamscore")]
#[command(author, version, about)]
pub struct Args {
    /// Steam ID, profile URL or vanity name
    #[arg(short = 'i', long = "steam-id", value_name = "STEAM_ID")]
    pub steam_id: String,

    /// Steam Web API key (falls back to `api_key` in the config file)
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Also write `<steamid>_games_non_zero.csv`, sorted by review score
    #[arg(long)]
    pub non_zero: bool,

    /// Directory for the output files (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Minimum delay between requests to same host in milliseconds (0 to disable, max 60000)
    #[arg(short = 'l', long, default_value_t = DEFAULT_RATE_LIMIT_MS, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub rate_limit: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Override the Steam Web API base URL
    #[arg(long, hide = true, value_name = "URL")]
    pub steam_api_url: Option<String>,

    /// Override the SteamSpy endpoint
    #[arg(long, hide = true, value_name = "URL")]
    pub steamspy_url: Option<String>,
}
