//! Mock Halo API client for testing
//!
//! Provides a scripted implementation of [`HaloApi`] for unit testing
//! without making real API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::models::AccessToken;
use super::stats::CallStatsRecorder;
use super::{CallStats, HaloApi};
use crate::config::Credential;
use crate::error::{ApiError, Result};

/// Time recorded for every mocked call
pub const MOCK_CALL_DURATION: Duration = Duration::from_millis(5);

/// API root used by the mock client
pub const MOCK_API_ROOT: &str = "https://halo.test";

/// A scripted response for one GET request
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with this JSON body
    Json(Value),
    /// 401, the session token is no longer valid
    Unauthorized,
    /// Any other failure
    Failure,
}

/// Mock API client for testing.
///
/// Responses are queued per URL. Each GET consumes the front of the queue,
/// except that the last queued response is repeated for later requests.
/// Unscripted URLs answer with `NotFound`.
///
/// # Example
/// ```ignore
/// let mock = MockHaloClient::new()
///     .with_response(url, MockResponse::Unauthorized)
///     .await
///     .with_response(url, MockResponse::Json(json!({ "issues": [] })))
///     .await;
/// ```
pub struct MockHaloClient {
    /// Queued responses by URL
    responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Number of successful authentications before authentication fails
    auth_fail_after: Arc<Mutex<Option<usize>>>,
    /// Track number of calls for verification
    counts: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    stats: CallStatsRecorder,
}

impl Default for MockHaloClient {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            auth_fail_after: Arc::new(Mutex::new(None)),
            counts: Arc::new(Mutex::new(CallCounts::default())),
            requests: Arc::new(Mutex::new(Vec::new())),
            stats: CallStatsRecorder::new(),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub get_json: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.authenticate + self.get_json
    }
}

/// A captured GET request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Requested URL
    pub url: String,
    /// Token sent with the request
    pub token: String,
}

impl MockHaloClient {
    /// Create a new mock client with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`.
    pub async fn with_response(self, url: impl Into<String>, response: MockResponse) -> Self {
        self.responses
            .lock()
            .await
            .entry(url.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a JSON response for `url`.
    pub async fn with_json(self, url: impl Into<String>, body: Value) -> Self {
        self.with_response(url, MockResponse::Json(body)).await
    }

    /// Let `successes` authentications succeed, then reject the rest.
    ///
    /// Rejected attempts still count towards `CallCounts::authenticate`.
    pub async fn fail_authentication_after(self, successes: usize) -> Self {
        *self.auth_fail_after.lock().await = Some(successes);
        self
    }

    /// Get call counts.
    pub async fn counts(&self) -> CallCounts {
        self.counts.lock().await.clone()
    }

    /// Get captured GET requests.
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of GET requests made for `url`.
    pub async fn requests_for(&self, url: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait]
impl HaloApi for MockHaloClient {
    async fn authenticate(&self, _credential: &Credential) -> Result<AccessToken> {
        self.stats.record(MOCK_CALL_DURATION);

        let attempt = {
            let mut counts = self.counts.lock().await;
            counts.authenticate += 1;
            counts.authenticate
        };

        if let Some(limit) = *self.auth_fail_after.lock().await
            && attempt > limit
        {
            return Err(ApiError::Unauthorized.into());
        }

        Ok(AccessToken {
            token: format!("token-{}", attempt),
            expires_at: None,
        })
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<Value> {
        self.stats.record(MOCK_CALL_DURATION);
        self.counts.lock().await.get_json += 1;
        self.requests.lock().await.push(CapturedRequest {
            url: url.to_string(),
            token: token.to_string(),
        });

        let response = {
            let mut responses = self.responses.lock().await;
            match responses.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match response {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Unauthorized) => Err(ApiError::Unauthorized.into()),
            Some(MockResponse::Failure) => {
                Err(ApiError::ServerError("scripted failure".to_string()).into())
            }
            None => Err(ApiError::NotFound(url.to_string()).into()),
        }
    }

    fn api_root(&self) -> &str {
        MOCK_API_ROOT
    }

    fn call_stats(&self) -> CallStats {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credential() -> Credential {
        Credential {
            key_id: "k".to_string(),
            secret: "s".to_string(),
        }
    }

    #[tokio::test]
    async fn test_queue_consumes_then_repeats_last() {
        let url = "https://halo.test/v2/groups";
        let mock = MockHaloClient::new()
            .with_response(url, MockResponse::Unauthorized)
            .await
            .with_json(url, json!({ "ok": true }))
            .await;

        assert!(mock.get_json(url, "t").await.is_err());
        assert_eq!(mock.get_json(url, "t").await.unwrap(), json!({ "ok": true }));
        assert_eq!(mock.get_json(url, "t").await.unwrap(), json!({ "ok": true }));
        assert_eq!(mock.requests_for(url).await, 3);
    }

    #[tokio::test]
    async fn test_unscripted_url_is_not_found() {
        let mock = MockHaloClient::new();
        assert!(mock.get_json("https://halo.test/nope", "t").await.is_err());
        assert_eq!(mock.counts().await.get_json, 1);
    }

    #[tokio::test]
    async fn test_tokens_are_numbered() {
        let mock = MockHaloClient::new();
        assert_eq!(mock.authenticate(&credential()).await.unwrap().token, "token-1");
        assert_eq!(mock.authenticate(&credential()).await.unwrap().token, "token-2");

        let stats = mock.call_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(mock.counts().await.total(), 2);
    }
}
