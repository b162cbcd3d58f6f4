//! Global configuration loaded from `~/.config/mfdl/config.toml`.
//!
//! Created with defaults on first run; CLI flags override individual values
//! for one invocation without touching the file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::http;
use crate::storage::CollisionPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfdlConfig {
    /// Whole-transfer timeout per HTTP request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Name-collision handling: "rename" (default), "overwrite", or "skip".
    #[serde(default)]
    pub collision: CollisionPolicy,
    /// Optional libcurl receive buffer size in bytes (None = library default).
    #[serde(default)]
    pub receive_buffer_bytes: Option<usize>,
}

fn default_timeout_secs() -> u64 {
    http::DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    http::DEFAULT_USER_AGENT.to_string()
}

impl Default for MfdlConfig {
    fn default() -> Self {
        MfdlConfig {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            collision: CollisionPolicy::default(),
            receive_buffer_bytes: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MfdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MfdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MfdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
