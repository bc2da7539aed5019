//! API credentials file loading
//!
//! A credentials file holds one `key_id|secret` pair per line. Blank lines and
//! lines starting with `#` are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// A Halo API key id and its secret
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub key_id: String,
    pub secret: String,
}

// Keep secrets out of debug logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Load all credentials from `filename`.
///
/// The file is looked up as given first, then relative to `base_dir` (the
/// directory holding the executable). Returns an error if the file is missing,
/// a line is malformed, or the file holds no credentials.
pub fn load_credentials(filename: &str, base_dir: Option<&Path>) -> Result<Vec<Credential>> {
    let path = resolve(filename, base_dir)?;
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let credentials = parse(&contents)?;
    if credentials.is_empty() {
        return Err(ConfigError::NoCredentials(path).into());
    }

    log::debug!(
        "Loaded {} credential(s) from {}",
        credentials.len(),
        path.display()
    );
    Ok(credentials)
}

fn resolve(filename: &str, base_dir: Option<&Path>) -> Result<PathBuf> {
    let direct = PathBuf::from(filename);
    if direct.is_file() {
        return Ok(direct);
    }

    if let Some(dir) = base_dir {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(ConfigError::CredentialsNotFound(direct).into())
}

fn parse(contents: &str) -> Result<Vec<Credential>> {
    let mut credentials = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key_id, secret) = line
            .split_once('|')
            .map(|(k, s)| (k.trim(), s.trim()))
            .filter(|(k, s)| !k.is_empty() && !s.is_empty())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "credentials line {}: expected key_id|secret",
                    index + 1
                ))
            })?;

        credentials.push(Credential {
            key_id: key_id.to_string(),
            secret: secret.to_string(),
        });
    }

    Ok(credentials)
}
