use anyhow::{Context, Result};
use tzclock_core::ports::{AppConfig, ConfigStore};

use crate::cli::CliArgs;

/// Load the stored config and apply CLI overrides on top.
/// The overrides are not written back to the store.
pub fn from_cli_and_store(cli_args: &CliArgs, store: &dyn ConfigStore) -> Result<AppConfig> {
    let mut config = store.load()?;

    // CLI args override config file
    if let Some(server_url) = &cli_args.server_url {
        config.server_url = server_url.clone();
    }
    if let Some(zone) = &cli_args.zone {
        config.default_zone = Some(zone.clone());
    }
    config.default_zone = config
        .default_zone
        .map(|zone| zone.trim().to_string())
        .filter(|zone| !zone.is_empty());

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
