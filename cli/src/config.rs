// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use wire_core::{APP_NAME, Config as CoreConfig};

const WIRE_CONFIG_ENV: &str = "WIRE_CONFIG";

/// Loads the configuration and applies environment overrides.
///
/// The file is taken from `path`, else from `WIRE_CONFIG`, else from the
/// user config directory. Only the last location may be absent, in which case
/// defaults plus the environment are used.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        Some(path)
    } else if let Ok(env_path) = std::env::var(WIRE_CONFIG_ENV) {
        Some(PathBuf::from(env_path))
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if config.exists() {
            Some(config)
        } else {
            tracing::info!(path = %config.display(), "no config file, using defaults and environment");
            None
        }
    };

    let mut config = match path {
        Some(path) => {
            fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
                .parse::<ConfigRaw>()?
                .core
        }
        None => CoreConfig::default(),
    };

    config.apply_env(|name| std::env::var(name).ok());
    config.normalize()?;
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
struct ConfigRaw {
    core: CoreConfig,
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
