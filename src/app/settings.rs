use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{backdrop::Variant, cli::Cli};

const CONFIG_DIR_ENV: &str = "ORDERDESK_CONFIG_DIR";

/// Choices the user can change while the app runs, kept across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub effect: Variant,
    pub reduced_motion: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            effect: Variant::Hail,
            reduced_motion: false,
        }
    }
}

impl RuntimeSettings {
    #[must_use]
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli_overrides(cli);
        settings
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(effect) = cli.effect {
            self.effect = effect.into();
        }
        if cli.reduced_motion {
            self.reduced_motion = true;
        }
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let Some(path) = settings_path() else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    let settings = load_runtime_settings_from(cli, &path);
    (settings, Some(path))
}

/// Saved settings from `path` with CLI flags on top. A missing or unreadable
/// file yields the defaults.
pub fn load_runtime_settings_from(cli: &Cli, path: &Path) -> RuntimeSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<RuntimeSettings>(&content).unwrap_or_else(|err| {
            debug!("ignoring unreadable settings at {}: {err}", path.display());
            RuntimeSettings::default()
        }),
        Err(_) => RuntimeSettings::default(),
    };
    settings.apply_cli_overrides(cli);
    settings
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("orderdesk")
            .join("settings.json"),
    )
}

#[cfg(test)]
mod tests;
