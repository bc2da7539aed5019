//! Configuration management for halo-issues

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

mod credentials;

pub use credentials::{Credential, load_credentials};

/// Default Halo REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://portal-perf.cloudpassage.com";

/// Default Halo REST API port, applied when the base URL names none
pub const DEFAULT_PORT: u16 = 443;

/// Default number of servers requested per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default credentials file name
pub const DEFAULT_AUTH_FILE: &str = "issues.auth";

/// Settings loaded from the optional YAML settings file.
///
/// Command-line flags and environment variables take precedence over these
/// values; anything left unset falls back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Halo REST API base URL
    pub base_url: Option<String>,

    /// Halo REST API port
    pub port: Option<u16>,

    /// Servers requested per page
    pub page_size: Option<usize>,

    /// Credentials file name or path
    pub auth_file: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".halo-issues").join("config.yaml"))
    }

    /// Load settings from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No settings file at {}, using defaults", path.display());
                    Ok(Self::defaults())
                }
            }
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Settings with every optional value unset
    pub fn defaults() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            ..Self::default()
        }
    }

    /// Reject values the API cannot accept
    pub fn validate(&self) -> Result<()> {
        if self.page_size == Some(0) {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()).into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()).into());
        }
        Ok(())
    }
}
