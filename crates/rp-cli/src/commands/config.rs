//! Config command implementations

use std::path::Path;

use anyhow::{Context, Result};

use crate::output::{print_error, print_info, print_success, print_warning};
use rp_core::config::{self, ClientConfig};
use rp_core::error::ConfigError;

const MASK: &str = "********";

/// Load the config file, falling back to defaults when it does not exist
pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    match config::load_config(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => {
            tracing::debug!("no config file at {:?}, using defaults", path);
            Ok(ClientConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load config file: {:?}", path)),
    }
}

/// Print the config file path
pub fn config_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

/// Show the effective configuration with secrets masked
pub fn config_show(path: &Path, effective: &ClientConfig) -> Result<()> {
    if path.exists() {
        print_info(&format!("Configuration file: {:?}", path));
    } else {
        print_warning(&format!("No configuration file found at {:?}", path));
        print_info("Run 'rportcli config init' to create one");
    }

    let masked = masked(effective);
    println!("{}", toml::to_string_pretty(&masked)?);

    Ok(())
}

/// Write the effective configuration to the config file
pub fn config_init(path: &Path, effective: &ClientConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        print_error(&format!("Config file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    config::save_config(path, effective)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    print_success(&format!("Created configuration file: {:?}", path));
    Ok(())
}

fn masked(config: &ClientConfig) -> ClientConfig {
    let mask = |secret: &Option<String>| {
        secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|_| MASK.to_string())
    };

    ClientConfig {
        api_password: mask(&config.api_password),
        api_token: mask(&config.api_token),
        ..config.clone()
    }
}
