//! Configuration options.
//!
//! Applications embedding the engine are free to define their own command
//! line arguments; the engine itself takes a small TOML configuration file
//! describing per-session capture options. The path to the configuration
//! file will typically be a command line argument passed to the application.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Loads a configuration file from `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CaptureConfig> {
    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.as_ref().display()))?;
    let config: CaptureConfig = toml::from_str(&config_str).context("invalid config file")?;
    Ok(config)
}

/// Returns the default configuration.
pub fn default_config() -> CaptureConfig {
    CaptureConfig::default()
}

/// Capture-session options.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CaptureConfig {
    /// Ports considered TLS traffic; a packet passes if either endpoint
    /// matches. An empty list disables port filtering. Defaults to `[443]`.
    #[serde(default = "default_watch_ports")]
    pub watch_ports: Vec<u16>,

    /// Upper bound on flows tracked per session. Defaults to `100_000`.
    #[serde(default = "default_max_flows")]
    pub max_flows: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            watch_ports: default_watch_ports(),
            max_flows: default_max_flows(),
        }
    }
}

fn default_watch_ports() -> Vec<u16> {
    vec![443]
}

fn default_max_flows() -> usize {
    100_000
}
