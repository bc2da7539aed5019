//! Halo API client

use async_trait::async_trait;

use crate::config::Credential;
use crate::error::Result;

pub mod halo;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod session;
pub mod stats;

pub use halo::HaloClient;
#[cfg(test)]
pub use mock::MockHaloClient;
pub use session::Session;
pub use stats::CallStats;

use models::AccessToken;

/// Transport seam for the Halo REST API.
///
/// Implementations perform single authenticated requests and keep call
/// statistics; retry and session policy live above this trait.
#[async_trait]
pub trait HaloApi: Send + Sync {
    /// Exchange an API key for an access token
    async fn authenticate(&self, credential: &Credential) -> Result<AccessToken>;

    /// GET `url` with `token` and return the JSON body.
    ///
    /// An expired or revoked token is reported as `ApiError::Unauthorized`.
    async fn get_json(&self, url: &str, token: &str) -> Result<serde_json::Value>;

    /// API root URL (scheme, host and port) that request paths are joined to
    fn api_root(&self) -> &str;

    /// Count and total duration of all calls made so far
    fn call_stats(&self) -> CallStats;
}
