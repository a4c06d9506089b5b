//! Optional user configuration read from `<SCOUT_HOME>/config.toml`.
//!
//! Every field is optional; the binary applies environment flags first, then
//! these values, then built-in defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub discovery: Option<DiscoveryCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryCfg {
    pub root: Option<String>,
    pub extension: Option<String>,
    pub exclude: Option<String>,
    pub deadline_ms: Option<u64>,
    pub parallel: Option<bool>,
    pub max_parallel_reads: Option<usize>,
    /// Registration table path (TOML, YAML or JSON).
    pub registry: Option<String>,
    /// `lines` or `json`.
    pub output: Option<String>,
}

pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UserConfig =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Environment wins when set, then the config value, then the flag default.
pub fn pick<T>(env_set: bool, env_value: T, cfg_value: Option<T>) -> T {
    if env_set {
        env_value
    } else {
        cfg_value.unwrap_or(env_value)
    }
}

/// How discovered names are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One qualified name per line.
    #[default]
    Lines,
    /// A JSON array of qualified names.
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "lines" | "text" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow::anyhow!("unknown output format '{}'", other)),
        }
    }
}
