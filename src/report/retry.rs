//! One-shot re-authenticate-and-retry
//!
//! A fetch that fails is retried exactly once after the session has been
//! re-authenticated. If the retry fails too the resource is given up and
//! `None` is returned; the caller skips it and carries on.

use std::future::Future;

use log::{debug, warn};

use crate::client::{HaloApi, Session};
use crate::error::Result;

/// Run `fetch`, and on failure re-authenticate and run it once more.
///
/// `resource` names what is being fetched for log messages. Each call gets
/// its own single retry; nothing is shared between calls.
pub async fn with_reauth<C, T, F, Fut>(
    session: &Session<C>,
    resource: &str,
    mut fetch: F,
) -> Option<T>
where
    C: HaloApi,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let seen = session.generation();

    match fetch().await {
        Ok(value) => return Some(value),
        Err(err) if err.is_unauthorized() => {
            debug!("Session rejected while fetching {}; re-authenticating", resource)
        }
        Err(err) => debug!("Fetching {} failed ({}); re-authenticating", resource, err),
    }

    if let Err(err) = session.reauthenticate(seen).await {
        warn!("Re-authentication failed: {}", err);
    }

    match fetch().await {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("Skipping {} after retry: {}", resource, err);
            None
        }
    }
}
