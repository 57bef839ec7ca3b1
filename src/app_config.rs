//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Directory name under the config base.
const CONFIG_DIR_NAME: &str = "steamscore";

/// File-backed defaults for the export command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Steam Web API key used when `-k` is not given.
    pub api_key: Option<String>,
    /// Default output directory.
    pub output_dir: Option<PathBuf>,
    /// Default per-host rate limit in milliseconds.
    pub rate_limit: Option<u64>,
    /// Write the non-zero sorted file by default.
    pub non_zero: Option<bool>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Optional connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(rate_limit) = self.rate_limit
            && rate_limit > 60_000
        {
            bail!("Invalid config value for `rate_limit`: {rate_limit}. Expected range: 0..=60000");
        }
        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            bail!("Invalid config value for `api_key`: must not be empty");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/steamscore/config.toml`
/// 2. `$HOME/.config/steamscore/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path) if path.exists() => Some(load_file_config(path)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let line_no = line_index + 1;

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };
        let key = raw_key.trim();
        let raw_value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value {raw_value} on line {line_no}");
        let value = ConfigValue::parse(raw_value).with_context(invalid)?;

        match key {
            "api_key" => cfg.api_key = Some(value.text().with_context(invalid)?),
            "output_dir" => cfg.output_dir = Some(value.text().with_context(invalid)?.into()),
            "rate_limit" => cfg.rate_limit = Some(value.integer().with_context(invalid)?),
            "non_zero" => cfg.non_zero = Some(value.flag().with_context(invalid)?),
            "verbosity" => {
                let label = value.text().with_context(invalid)?;
                cfg.verbosity = Some(label.parse::<VerbositySetting>().with_context(invalid)?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(value.integer().with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(value.integer().with_context(invalid)?);
            }
            unknown => bail!("Unknown configuration key: '{unknown}' on line {line_no}"),
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Cuts a trailing `# comment`, ignoring `#` inside double quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut quoted = false;
    let comment = line.char_indices().find(|&(_, ch)| {
        if ch == '"' {
            quoted = !quoted;
        }
        ch == '#' && !quoted
    });
    comment.map_or(line, |(index, _)| &line[..index])
}

/// Right-hand side of a `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigValue {
    Text(String),
    Integer(u64),
    Flag(bool),
}

impl ConfigValue {
    fn parse(raw: &str) -> Result<Self> {
        if let Some(rest) = raw.strip_prefix('"') {
            let Some(inner) = rest.strip_suffix('"') else {
                bail!("Unterminated string");
            };
            return Ok(Self::Text(inner.to_string()));
        }
        match raw {
            "true" => Ok(Self::Flag(true)),
            "false" => Ok(Self::Flag(false)),
            _ if raw.starts_with(|ch: char| ch.is_ascii_digit()) => raw
                .parse()
                .map(Self::Integer)
                .with_context(|| format!("'{raw}' is not a u64")),
            _ => bail!("Expected a double-quoted string, a non-negative integer or true/false"),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Integer(_) => "integer",
            Self::Flag(_) => "boolean",
        }
    }

    fn text(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            other => bail!("Expected a double-quoted string, found {}", other.kind()),
        }
    }

    fn integer(self) -> Result<u64> {
        match self {
            Self::Integer(value) => Ok(value),
            other => bail!("Expected an integer, found {}", other.kind()),
        }
    }

    fn flag(self) -> Result<bool> {
        match self {
            Self::Flag(value) => Ok(value),
            other => bail!("Expected true or false, found {}", other.kind()),
        }
    }
}

impl std::str::FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        Ok(match label {
            "default" => Self::Default,
            "verbose" => Self::Verbose,
            "quiet" => Self::Quiet,
            "debug" => Self::Debug,
            other => bail!("Unknown verbosity '{other}'; expected default, verbose, quiet or debug"),
        })
    }
}
