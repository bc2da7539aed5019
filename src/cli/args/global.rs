//! Connection options resolved from the CLI and the settings file
//!
//! Precedence is: CLI flag > environment variable > settings file > default.
//! Clap already folds environment variables into the CLI layer, so only the
//! settings file and the built-in defaults remain to be merged here.

use std::time::Duration;

use crate::cli::Cli;
use crate::config::{DEFAULT_AUTH_FILE, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_PORT, Settings};

/// Fully resolved connection and paging options for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Halo REST API base URL
    pub base_url: String,

    /// Halo REST API port
    pub port: u16,

    /// Credentials file name or path
    pub auth_file: String,

    /// Servers requested per page
    pub page_size: usize,

    /// HTTP request timeout
    pub timeout: Duration,
}

impl GlobalOptions {
    /// Merge parsed CLI flags over loaded settings.
    pub fn resolve(cli: &Cli, settings: &Settings) -> Self {
        Self {
            base_url: cli
                .base_url
                .clone()
                .or_else(|| settings.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: cli.port.or(settings.port).unwrap_or(DEFAULT_PORT),
            auth_file: cli
                .auth_file
                .clone()
                .or_else(|| settings.auth_file.clone())
                .unwrap_or_else(|| DEFAULT_AUTH_FILE.to_string()),
            page_size: cli
                .page_size
                .map(|n| n as usize)
                .or(settings.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}
