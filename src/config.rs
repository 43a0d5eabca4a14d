// src/config.rs
// =============================================================================
// Email credentials, read once at startup from a TOML file:
//
//   username = "me@example.com"
//   password = "app-password"
//   smtp_host = "smtp.gmail.com"   # optional
//   smtp_port = 587                # optional
//
// Lookup order for the file: --config, then $REGWATCH_CONFIG, then
// <config dir>/regwatch/config.toml.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "REGWATCH_CONFIG";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Deserialize)]
pub struct EmailConfig {
    /// Login for the relay; also used as the sender address
    pub username: String,
    pub password: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

// Keep the password out of debug output and logs
impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl EmailConfig {
    // Finds and loads the config file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = config_path(explicit, std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.username.trim().is_empty() {
            return Err(anyhow!("'username' must not be empty"));
        }
        Ok(config)
    }
}

fn config_path(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = from_env {
        return Ok(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join("regwatch").join("config.toml"))
        .ok_or_else(|| anyhow!("no config directory on this system; pass --config"))
}
