//! Authentication session holder
//!
//! Owns the transport client, the credential and the current access token.
//! Every request reads the token at call time, so a request issued after a
//! re-authentication always carries the refreshed token.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::{Mutex, RwLock};

use super::{CallStats, HaloApi};
use crate::config::Credential;
use crate::error::{ApiError, Result};

/// Authenticated access to the Halo API
pub struct Session<C> {
    client: C,
    credential: Credential,
    token: RwLock<Option<String>>,
    /// Bumped each time a new token is installed
    generation: AtomicU64,
    /// Serializes re-authentication
    reauth: Mutex<()>,
}

impl<C: HaloApi> Session<C> {
    /// Create an unauthenticated session.
    pub fn new(client: C, credential: Credential) -> Self {
        Self {
            client,
            credential,
            token: RwLock::new(None),
            generation: AtomicU64::new(0),
            reauth: Mutex::new(()),
        }
    }

    /// Establish the initial session.
    pub async fn authenticate(&self) -> Result<()> {
        self.reauthenticate(self.generation()).await
    }

    /// Current token generation; pass it to [`Session::reauthenticate`].
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the session token.
    ///
    /// `seen` is the generation observed before the failing request. If the
    /// token has already been replaced since then, no new token is requested.
    pub async fn reauthenticate(&self, seen: u64) -> Result<()> {
        let _guard = self.reauth.lock().await;

        if self.generation() != seen {
            debug!("Session already refreshed by another request");
            return Ok(());
        }

        let token = self.client.authenticate(&self.credential).await?;
        if let Some(expires_at) = token.expires_at {
            debug!("Session token valid until {}", expires_at.to_rfc3339());
        }
        *self.token.write().await = Some(token.token);
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// GET `url` with the current session token.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(ApiError::Unauthorized)?;
        self.client.get_json(url, &token).await
    }

    /// API root URL of the underlying client
    pub fn api_root(&self) -> &str {
        self.client.api_root()
    }

    /// Transport call statistics of the underlying client
    pub fn call_stats(&self) -> CallStats {
        self.client.call_stats()
    }

    /// The underlying transport client
    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }
}
