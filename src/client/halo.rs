//! Halo API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;

use super::models::AccessToken;
use super::stats::CallStatsRecorder;
use super::{CallStats, HaloApi};
use crate::config::Credential;
use crate::error::{ApiError, Result};

/// Client-side request quota
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Halo API client
pub struct HaloClient {
    http: HttpClient,
    api_root: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    stats: CallStatsRecorder,
}

impl HaloClient {
    /// Create a new client for `base_url`.
    ///
    /// `port` is applied only when the base URL does not already name one.
    pub fn new(base_url: &str, port: u16, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            api_root: api_root(base_url, port)?,
            rate_limiter,
            stats: CallStatsRecorder::new(),
        })
    }

    /// Send a request, recording its duration in the call statistics.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let started = Instant::now();
        let response = request.send().await;
        self.stats.record(started.elapsed());

        Ok(response.map_err(ApiError::from)?)
    }
}

/// Join `port` onto `base_url` unless it already carries an explicit port.
fn api_root(base_url: &str, port: u16) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::InvalidUrl(format!("base URL '{}': {}", base_url, e)))?;

    if url.port().is_none() {
        url.set_port(Some(port))
            .map_err(|_| ApiError::InvalidUrl(format!("cannot set port on '{}'", base_url)))?;
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Map a non-success status to the matching API error.
async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => {
            let url = response.url().path().to_string();
            ApiError::NotFound(url)
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            ApiError::RateLimit(Duration::from_secs(retry_after))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP {}", status));
            ApiError::BadRequest(error_msg)
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP {}", status));
            ApiError::ServerError(error_msg)
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

#[async_trait]
impl HaloApi for HaloClient {
    async fn authenticate(&self, credential: &Credential) -> Result<AccessToken> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: Option<i64>,
        }

        let url = format!(
            "{}/oauth/access_token?grant_type=client_credentials",
            self.api_root
        );
        let request = self
            .http
            .post(&url)
            .basic_auth(&credential.key_id, Some(&credential.secret));

        let response = self.send(request).await?;
        if response.status() != StatusCode::OK {
            return Err(status_error(response).await.into());
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        debug!("Authenticated API key {}", credential.key_id);

        Ok(AccessToken {
            token: body.access_token,
            expires_at: body
                .expires_in
                .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
        })
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<serde_json::Value> {
        let request = self.http.get(url).bearer_auth(token);
        let response = self.send(request).await?;

        if response.status() != StatusCode::OK {
            let err = status_error(response).await;
            debug!("GET {} failed: {}", url, err);
            return Err(err.into());
        }

        let data = response.json::<serde_json::Value>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("body of {} is not JSON: {}", url, e))
        })?;
        Ok(data)
    }

    fn api_root(&self) -> &str {
        &self.api_root
    }

    fn call_stats(&self) -> CallStats {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HaloClient::new("https://api.example.test", 443, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_api_root_applies_port() {
        assert_eq!(
            api_root("https://api.example.test", 8443).unwrap(),
            "https://api.example.test:8443"
        );
        assert_eq!(
            api_root("http://127.0.0.1:1234/", 443).unwrap(),
            "http://127.0.0.1:1234"
        );
    }

    #[test]
    fn test_api_root_default_https_port() {
        // The URL type normalises the scheme's default port away.
        assert_eq!(
            api_root("https://api.example.test", 443).unwrap(),
            "https://api.example.test"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(api_root("not a url", 443).is_err());
    }

    #[test]
    fn test_new_client_has_no_calls() {
        let client =
            HaloClient::new("https://api.example.test", 443, Duration::from_secs(5)).unwrap();
        assert_eq!(client.call_stats(), CallStats::default());
    }
}
