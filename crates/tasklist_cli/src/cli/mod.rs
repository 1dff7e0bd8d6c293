use clap::Parser;
use std::path::PathBuf;
use tasklist_core::config::{ConfigOverrides, canonical_key};
use tasklist_core::error::AppError;

/// Keep a personal task list from an interactive menu
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task file to load at startup and save to (default: tasks.json)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StoreFile,
    Theme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let target = match canonical_key(key_raw).as_str() {
        "" => return Err("override key cannot be empty".to_string()),
        "store_file" | "file" => ConfigOverrideTarget::StoreFile,
        "theme" => ConfigOverrideTarget::Theme,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if target == ConfigOverrideTarget::StoreFile && value.is_empty() {
        return Err("store_file override requires a path".to_string());
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` into one set; later entries win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)
            .map_err(|message| AppError::config(format!("{entry}: {message}")))?;
        match parsed.target {
            ConfigOverrideTarget::StoreFile => overrides.store_file = Some(parsed.value),
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
        }
    }

    Ok(overrides)
}
