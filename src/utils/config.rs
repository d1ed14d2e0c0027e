use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::models::{Settings, SnoozePolicy};

const ENV_CONFIG_PATH: &str = "LIFEPLANNER_CONFIG";
const ENV_SNOOZE_POLICY: &str = "LIFEPLANNER_SNOOZE_POLICY";
const ENV_OVERDUE_HOURS: &str = "LIFEPLANNER_OVERDUE_HOURS";
const DEFAULT_CONFIG_PATH: &str = "config/settings.json";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn settings_path() -> PathBuf {
    env_value(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads settings from `path`; a missing file yields the defaults. Values
/// are normalized so timestamp arithmetic on them cannot overflow.
pub fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    if !path.exists() {
        log::debug!("[Config] {} not found, using defaults", path.display());
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let settings = serde_json::from_str::<Settings>(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(settings.normalized())
}

pub fn write_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if let Some(raw) = env_value(ENV_SNOOZE_POLICY) {
        match SnoozePolicy::parse(&raw) {
            Some(policy) => settings.todo.snooze_policy = policy,
            None => log::warn!("[Config] ignoring unknown {}={}", ENV_SNOOZE_POLICY, raw),
        }
    }
    if let Some(raw) = env_value(ENV_OVERDUE_HOURS) {
        match raw.parse::<i64>() {
            Ok(hours) if hours > 0 => settings.todo.overdue_threshold_hours = hours,
            _ => log::warn!("[Config] ignoring invalid {}={}", ENV_OVERDUE_HOURS, raw),
        }
    }
}

/// Resolves the settings file, writing the defaults there on first run, then
/// layers the environment overrides on top.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = settings_path();
    if !path.exists() {
        match write_settings(&path, &Settings::default()) {
            Ok(()) => log::info!("[Config] wrote default settings to {}", path.display()),
            Err(e) => log::warn!("[Config] could not write defaults: {:#}", e),
        }
    }
    let mut settings = read_settings(&path)?;
    apply_env_defaults(&mut settings);
    Ok(settings.normalized())
}
