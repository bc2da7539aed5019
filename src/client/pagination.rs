//! Pagination helpers for the server listing
//!
//! The Halo API pages server lists with an opaque cursor: each response carries
//! the absolute URL of the next page under `pagination.next`, or `null` on the
//! last page. Only the first request is built locally; every later URL comes
//! straight from the previous response.

use reqwest::Url;
use serde::Deserialize;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{ApiError, Result};

/// Pagination links returned alongside a page of results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationLinks {
    /// Absolute URL of the next page; `None` on the last page
    #[serde(default)]
    pub next: Option<String>,
}

/// Parameters of the first server listing request for a group.
///
/// # Example
/// ```ignore
/// let url = ServerListQuery::new("group-1")
///     .page_size(50)
///     .active_only(true)
///     .to_url("https://api.cloudpassage.com:443")?;
/// ```
#[derive(Debug, Clone)]
pub struct ServerListQuery {
    group_id: String,
    page_size: usize,
    active_only: bool,
}

impl ServerListQuery {
    /// Create a query for the servers of `group_id`.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
            active_only: true,
        }
    }

    /// Set the number of servers per page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Restrict the listing to active servers.
    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("group_id", self.group_id.clone()),
            ("per_page", self.page_size.to_string()),
        ];

        if self.active_only {
            params.push(("status", "active".to_string()));
        }

        params
    }

    /// Build the first page URL below `api_root`.
    pub fn to_url(&self, api_root: &str) -> Result<String> {
        let url = Url::parse_with_params(&format!("{}/v2/servers", api_root), self.to_query_params())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", api_root, e)))?;
        Ok(url.into())
    }
}
