//! Bridge configuration via `kvbridge.toml`
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "kvbridge.toml";

/// Bridge configuration loaded from `kvbridge.toml`.
///
/// # Example
///
/// ```toml
/// # Maximum simultaneously live handles (0 = unlimited)
/// max_live_handles = 0
///
/// default_host = "127.0.0.1"
/// default_port = 8888
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Maximum simultaneously live handles. `0` means unlimited.
    #[serde(default)]
    pub max_live_handles: usize,
    /// Host used when a caller does not name one.
    #[serde(default = "default_host")]
    pub default_host: String,
    /// Port used when a caller does not name one.
    #[serde(default = "default_port")]
    pub default_port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_live_handles: 0,
            default_host: default_host(),
            default_port: default_port(),
        }
    }
}

impl BridgeConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kvbridge configuration
#
# Maximum number of simultaneously live handles (default: 0 = unlimited).
# Once reached, connect returns a dead handle.
max_live_handles = 0

# Address used when no host/port is given (default: 127.0.0.1:8888)
default_host = "127.0.0.1"
default_port = 8888
"#
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty default host or port 0.
    pub fn validate(&self) -> Result<()> {
        if self.default_host.trim().is_empty() {
            return Err(Error::Config {
                reason: "default_host must not be empty".to_string(),
            });
        }
        if self.default_port == 0 {
            return Err(Error::Config {
                reason: "default_port must be in 1..=65535".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => Error::Config {
                reason: format!("{} ({})", reason, path.display()),
            },
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }
}
