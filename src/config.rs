//! Optional TOML configuration
//!
//! A config file supplies defaults for the render flags and the remote fetch
//! settings. Every key is optional and command-line flags take precedence.
//!
//! ```toml
//! [render]
//! find = "[[user]]"
//! replace = "v1.2.3"
//! trim_newlines = true
//! stdout = false
//!
//! [remote]
//! timeout_secs = 30
//! user_agent = "ink/1.0"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default timeout for remote template requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent for remote template requests
pub const USER_AGENT: &str = "ink/1.0";

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderDefaults,
    pub remote: RemoteSettings,
}

/// Defaults for the render flags
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderDefaults {
    pub find: Option<String>,
    pub replace: Option<String>,
    pub trim_newlines: bool,
    pub stdout: bool,
}

/// Settings for the HTTP client used to fetch remote templates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
