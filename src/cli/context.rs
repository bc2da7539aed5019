//! Run execution context
//!
//! Loads settings and credentials, builds the API client and establishes the
//! session. Every failure here aborts the run before any output is produced.

use std::path::{Path, PathBuf};

use log::debug;

use crate::cli::{Cli, GlobalOptions};
use crate::client::{HaloApi, HaloClient, Session};
use crate::config::{Settings, load_credentials};
use crate::error::{ConfigError, Result};

/// Context for a report run: resolved options and an authenticated session.
pub struct RunContext {
    /// Resolved connection and paging options
    pub options: GlobalOptions,
    /// Authenticated API session
    pub session: Session<HaloClient>,
}

impl RunContext {
    /// Create a new run context with full initialization.
    ///
    /// This handles:
    /// - Loading the settings file (explicit path or default location)
    /// - Merging CLI flags over settings
    /// - Loading credentials, falling back to the executable's directory
    /// - Creating the API client and authenticating
    ///
    /// # Errors
    /// Returns error if settings or credentials cannot be loaded, or if the
    /// initial authentication fails.
    pub async fn new(cli: &Cli) -> Result<Self> {
        let settings = Settings::load_at(cli.config.as_deref())?;
        let options = GlobalOptions::resolve(cli, &settings);

        let exe_dir = executable_dir();
        let credentials = load_credentials(&options.auth_file, exe_dir.as_deref())?;
        if credentials.len() > 1 {
            debug!("Using the first of {} credentials", credentials.len());
        }
        let credential = credentials
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::NoCredentials(PathBuf::from(&options.auth_file)))?;

        let client = HaloClient::new(&options.base_url, options.port, options.timeout)?;
        debug!("Using Halo API at {}", client.api_root());

        let session = Session::new(client, credential);
        session.authenticate().await?;

        Ok(Self { options, session })
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
