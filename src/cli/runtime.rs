use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, SALT_ENV};

/// Turns the authorization switch off when set to `false`.
pub const AUTHORIZE_ENV: &str = "SAFEHARBOR_AUTHORIZE";

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => {
            // Priority: ./config/safeharbor.yaml > ~/.config/safeharbor/config.yaml
            let local_config = PathBuf::from("config/safeharbor.yaml");
            if local_config.exists() {
                local_config
            } else {
                let mut path = dirs::config_dir().context("Failed to get config directory")?;
                path.push("safeharbor");
                path.push("config.yaml");
                path
            }
        }
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .context("Failed to read config file")?;

        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded configuration from: {}", config_path.display());
        Ok(LoadedConfig {
            config,
            path: config_path,
        })
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        Ok(LoadedConfig {
            config: Config::default(),
            path: config_path,
        })
    }
}

pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(salt) = env::var(SALT_ENV) {
        if !salt.is_empty() {
            config.secret_salt = salt;
            info!("Using secret salt from {SALT_ENV}");
        }
    }

    if let Ok(raw) = env::var(AUTHORIZE_ENV) {
        match raw.parse::<bool>() {
            Ok(enabled) => {
                config.authorize = enabled;
                info!(enabled, "authorization switch set from {AUTHORIZE_ENV}");
            }
            Err(_) => warn!(value = %raw, "ignoring non-boolean {AUTHORIZE_ENV}"),
        }
    }
}
