mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./angle-catalog.toml",
        "~/.config/angle-catalog/config.toml",
        "/etc/angle-catalog/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let auth = &config.server.auth;
    if auth.enabled && auth.api_key.as_deref().map_or(true, str::is_empty) {
        anyhow::bail!("Authentication is enabled but no API key is set");
    }

    if config.storage.max_upload_bytes == 0 {
        anyhow::bail!("storage.max_upload_bytes cannot be 0");
    }

    if config.catalog.default_page_size == 0 {
        anyhow::bail!("catalog.default_page_size cannot be 0");
    }

    if config.storage.uploads_dir.as_os_str().is_empty() {
        anyhow::bail!("storage.uploads_dir cannot be empty");
    }

    Ok(())
}
