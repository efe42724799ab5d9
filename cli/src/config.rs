//! Configuration loading for the command-line wrapper.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use user_core::ClientConfig;

/// Load a TOML configuration file and deserialize it into the specified type.
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}

/// File values first, then flags (or their environment variables) on top.
pub fn resolve(
    file: Option<&Path>,
    api_root: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<ClientConfig> {
    let mut config = match file {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(root) = api_root {
        config.api_root = root;
    }
    if let Some(secs) = timeout_secs {
        config.timeout_secs = secs;
    }
    Ok(config)
}
