//! Binary-side glue: config merging, logging setup and the export run.

pub(crate) mod config_runtime;
pub(crate) mod progress_manager;
pub(crate) mod runtime;
pub(crate) mod terminal;

use anyhow::Result;
use tracing::{debug, info};

use crate::app_config;

pub(crate) async fn run() -> Result<()> {
    let (args, cli_sources) = config_runtime::parse_cli_with_sources();
    let loaded = app_config::load_default_file_config()?;
    let file_config = loaded.config.as_ref();

    let args = config_runtime::apply_config_defaults(args, &cli_sources, file_config);

    let default_level = config_runtime::resolve_default_log_level(&args);
    let profile = terminal::TerminalProfile::detect(&args);
    profile.init_tracing(default_level);

    if let (Some(path), Some(_)) = (loaded.path.as_deref(), file_config) {
        debug!(path = %path.display(), "loaded config file");
    }
    debug!(?cli_sources, "CLI arguments parsed");
    info!("steamscore starting");

    let api_key = config_runtime::resolve_api_key(&args, file_config, loaded.path.as_deref())?;
    let fetcher = config_runtime::resolve_fetcher_config(file_config);
    let settings = runtime::RunSettings::from_args(&args, api_key, fetcher, profile);

    runtime::run_export(settings).await?;
    Ok(())
}
