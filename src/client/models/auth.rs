//! Authentication models

use chrono::{DateTime, Utc};

/// OAuth access token issued by the Halo API
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token string
    pub token: String,

    /// Token expiration time, when the API reports one
    pub expires_at: Option<DateTime<Utc>>,
}
