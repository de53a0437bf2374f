// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use calcli_core::{APP_NAME, Config as CoreConfig};

const CALCLI_CONFIG_ENV: &str = "CALCLI_CONFIG";

/// How many days ahead the dashboard and the todo list look for due todos,
/// unless overridden in the `[cli]` config table.
const DEFAULT_DUE_DAYS: i64 = 2;

/// Locates and parses the configuration file.
///
/// Resolution order: `--config`, then the `CALCLI_CONFIG` environment
/// variable, then `config.toml` in the user config directory.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CALCLI_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// CLI-only configuration, the `[cli]` table of the config file.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct Config {
    /// Due window in days for the dashboard and `todo list`.
    #[serde(default)]
    pub days: Option<i64>,
}

impl Config {
    pub fn due_days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_DUE_DAYS)
    }
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    core: CoreConfig,

    #[serde(default)]
    cli: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
