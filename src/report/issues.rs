//! Per-server issue retrieval
//!
//! In summary mode the whole issue listing of a server is emitted as one
//! payload. In detailed mode the listing only supplies issue ids; each issue's
//! detail record is fetched and emitted on its own, in listing order. Both the
//! listing and every detail fetch get an independent re-authenticate-and-retry.

use std::io::Write;

use log::debug;
use reqwest::Url;

use super::retry::with_reauth;
use crate::client::models::{IssueRef, ScanType};
use crate::client::{HaloApi, Session};
use crate::error::{ApiError, Result};
use crate::output::ReportEmitter;

/// URL of the active-issue listing for one server.
pub fn issues_url(api_root: &str, server_id: &str, scan_types: &[ScanType]) -> Result<String> {
    let mut params = vec![("agent_id", server_id.to_string()), ("state", "active".to_string())];
    if !scan_types.is_empty() {
        params.push(("issue_type", ScanType::join(scan_types)));
    }

    let url = Url::parse_with_params(&format!("{}/v2/issues", api_root), params)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", api_root, e)))?;
    Ok(url.into())
}

/// URL of one issue's detail record.
pub fn issue_detail_url(api_root: &str, issue_id: &str) -> String {
    format!("{}/v2/issues/{}", api_root, urlencoding::encode(issue_id))
}

/// Fetches and emits the issues of individual servers
pub struct IssueResolver<'a, C> {
    session: &'a Session<C>,
    scan_types: &'a [ScanType],
    detailed: bool,
}

impl<'a, C: HaloApi> IssueResolver<'a, C> {
    pub fn new(session: &'a Session<C>, scan_types: &'a [ScanType], detailed: bool) -> Self {
        Self {
            session,
            scan_types,
            detailed,
        }
    }

    /// Fetch the issues of `server_id` and emit them.
    ///
    /// Returns the number of payloads emitted. A server whose listing cannot
    /// be fetched even after re-authenticating emits nothing and is not an
    /// error; only write failures are.
    pub async fn resolve<W: Write>(
        &self,
        server_id: &str,
        emitter: &mut ReportEmitter<W>,
    ) -> Result<usize> {
        let url = issues_url(self.session.api_root(), server_id, self.scan_types)?;
        let resource = format!("issues of server {}", server_id);

        let Some(listing) = with_reauth(self.session, &resource, || self.session.get_json(&url)).await
        else {
            return Ok(0);
        };

        if !self.detailed {
            emitter.emit(&listing)?;
            return Ok(1);
        }

        let mut emitted = 0;
        for issue in IssueRef::from_listing(&listing) {
            let Some(issue_id) = issue.id else {
                debug!("Skipping issue without id on server {}", server_id);
                continue;
            };

            if let Some(details) = self.details(&issue_id).await {
                emitter.emit(&details)?;
                emitted += 1;
            }
        }

        Ok(emitted)
    }

    async fn details(&self, issue_id: &str) -> Option<serde_json::Value> {
        let url = issue_detail_url(self.session.api_root(), issue_id);
        let resource = format!("issue {}", issue_id);
        with_reauth(self.session, &resource, || self.session.get_json(&url)).await
    }
}
