use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use steamscore_core::FetcherConfig;

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which options were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) output_dir: bool,
    pub(crate) rate_limit: bool,
    pub(crate) non_zero: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    split_matches(&matches).unwrap_or_else(|err| err.exit())
}

fn split_matches(matches: &ArgMatches) -> Result<(Args, CliValueSources), clap::Error> {
    let args = Args::from_arg_matches(matches)?;
    let sources = CliValueSources {
        output_dir: is_commandline_value(matches, "output_dir"),
        rate_limit: is_commandline_value(matches, "rate_limit"),
        non_zero: is_commandline_value(matches, "non_zero"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    };
    Ok((args, sources))
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills options not given on the command line from the config file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.output_dir
        && let Some(output_dir) = &file_config.output_dir
    {
        args.output_dir = Some(output_dir.clone());
    }

    if !cli_sources.rate_limit
        && let Some(rate_limit) = file_config.rate_limit
    {
        args.rate_limit = rate_limit;
    }

    if !cli_sources.non_zero
        && let Some(non_zero) = file_config.non_zero
    {
        args.non_zero = non_zero;
    }

    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.verbosity
    {
        apply_config_verbosity(&mut args, verbosity);
    }

    args
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    let (quiet, verbose) = match verbosity {
        VerbositySetting::Default => (false, 0),
        VerbositySetting::Verbose => (false, 1),
        VerbositySetting::Quiet => (true, 0),
        VerbositySetting::Debug => (false, 2),
    };
    args.quiet = quiet;
    args.verbose = verbose;
}

/// Picks the API key: command line first, then config file.
pub(crate) fn resolve_api_key(
    args: &Args,
    file_config: Option<&FileConfig>,
    config_path: Option<&Path>,
) -> Result<String> {
    let key = args
        .api_key
        .as_deref()
        .or_else(|| file_config.and_then(|cfg| cfg.api_key.as_deref()))
        .map(str::trim)
        .filter(|key| !key.is_empty());

    match key {
        Some(key) => Ok(key.to_string()),
        None => {
            let location = config_path.map_or_else(
                || "the config file".to_string(),
                |path| format!("'{}'", path.display()),
            );
            bail!("No Steam Web API key: pass -k/--key or set `api_key` in {location}")
        }
    }
}

pub(crate) fn resolve_fetcher_config(file_config: Option<&FileConfig>) -> FetcherConfig {
    let Some(file_config) = file_config else {
        return FetcherConfig::default();
    };
    FetcherConfig {
        connect_timeout: file_config.connect_timeout_secs.map(Duration::from_secs),
        read_timeout: file_config.read_timeout_secs.map(Duration::from_secs),
    }
}

pub(crate) fn resolve_output_dir(args: &Args) -> PathBuf {
    args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> (Args, CliValueSources) {
        let matches = Args::command()
            .try_get_matches_from(argv.iter().copied())
            .expect("arguments should parse");
        split_matches(&matches).expect("matches should convert")
    }

    fn file_config() -> FileConfig {
        FileConfig {
            api_key: Some("FILEKEY".to_string()),
            output_dir: Some(PathBuf::from("/from/file")),
            rate_limit: Some(2500),
            non_zero: Some(true),
            verbosity: Some(VerbositySetting::Quiet),
            connect_timeout_secs: Some(5),
            read_timeout_secs: None,
        }
    }

    #[test]
    fn test_file_values_fill_unset_options() {
        let (args, sources) = parse(&["steamscore", "-i", "1"]);
        let cfg = file_config();

        let args = apply_config_defaults(args, &sources, Some(&cfg));

        assert_eq!(args.output_dir, Some(PathBuf::from("/from/file")));
        assert_eq!(args.rate_limit, 2500);
        assert!(args.non_zero);
        assert!(args.quiet);
    }

    #[test]
    fn test_command_line_values_beat_file_values() {
        let (args, sources) = parse(&["steamscore", "-i", "1", "-o", "cli", "-l", "0", "-v"]);
        let cfg = file_config();

        let args = apply_config_defaults(args, &sources, Some(&cfg));

        assert_eq!(args.output_dir, Some(PathBuf::from("cli")));
        assert_eq!(args.rate_limit, 0);
        assert!(!args.quiet);
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_defaults_kept_without_file() {
        let (args, sources) = parse(&["steamscore", "-i", "1"]);
        let args = apply_config_defaults(args, &sources, None);
        assert_eq!(args.rate_limit, 1000);
        assert!(!args.non_zero);
        assert_eq!(resolve_output_dir(&args), PathBuf::from("."));
    }

    #[test]
    fn test_config_debug_verbosity_maps_to_trace() {
        let (args, sources) = parse(&["steamscore", "-i", "1"]);
        let cfg = FileConfig {
            verbosity: Some(VerbositySetting::Debug),
            ..FileConfig::default()
        };
        let args = apply_config_defaults(args, &sources, Some(&cfg));
        assert_eq!(resolve_default_log_level(&args), "trace");
    }

    #[test]
    fn test_api_key_prefers_command_line() {
        let (args, _) = parse(&["steamscore", "-i", "1", "-k", "CLIKEY"]);
        let cfg = file_config();
        let key = resolve_api_key(&args, Some(&cfg), None).expect("key expected");
        assert_eq!(key, "CLIKEY");
    }

    #[test]
    fn test_api_key_falls_back_to_file() {
        let (args, _) = parse(&["steamscore", "-i", "1"]);
        let cfg = file_config();
        let key = resolve_api_key(&args, Some(&cfg), None).expect("key expected");
        assert_eq!(key, "FILEKEY");
    }

    #[test]
    fn test_missing_api_key_names_config_path() {
        let (args, _) = parse(&["steamscore", "-i", "1"]);
        let err = resolve_api_key(&args, None, Some(Path::new("/cfg/steamscore/config.toml")))
            .expect_err("missing key expected");
        let message = err.to_string();
        assert!(message.contains("--key"));
        assert!(message.contains("/cfg/steamscore/config.toml"));
    }

    #[test]
    fn test_blank_command_line_key_is_missing() {
        let (args, _) = parse(&["steamscore", "-i", "1", "-k", "  "]);
        assert!(resolve_api_key(&args, None, None).is_err());
    }

    #[test]
    fn test_fetcher_config_from_file_timeouts() {
        let cfg = file_config();
        let fetcher = resolve_fetcher_config(Some(&cfg));
        assert_eq!(fetcher.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(fetcher.read_timeout, None);
        assert_eq!(resolve_fetcher_config(None), FetcherConfig::default());
    }

    #[test]
    fn test_log_levels() {
        let (args, _) = parse(&["steamscore", "-i", "1", "-q"]);
        assert_eq!(resolve_default_log_level(&args), "error");
        let (args, _) = parse(&["steamscore", "-i", "1"]);
        assert_eq!(resolve_default_log_level(&args), "info");
        let (args, _) = parse(&["steamscore", "-i", "1", "-v"]);
        assert_eq!(resolve_default_log_level(&args), "debug");
    }
}
