//! Cursor-driven server listing
//!
//! [`ServerPager`] yields one page at a time so callers can process each page
//! before the next one is requested.

use log::debug;

use crate::client::models::ServerPage;
use crate::client::pagination::ServerListQuery;
use crate::client::{HaloApi, Session};
use crate::error::Result;

/// Pages through the servers of one group
#[derive(Debug)]
pub struct ServerPager {
    next: Option<String>,
    pages_fetched: usize,
}

impl ServerPager {
    /// Start paging at `first_url`.
    pub fn new(first_url: String) -> Self {
        Self {
            next: Some(first_url),
            pages_fetched: 0,
        }
    }

    /// Start paging at the first page of `query`.
    pub fn for_query(query: &ServerListQuery, api_root: &str) -> Result<Self> {
        Ok(Self::new(query.to_url(api_root)?))
    }

    /// Fetch the next page.
    ///
    /// Returns `None` once the previous page carried no `next` cursor. A page
    /// that cannot be fetched or parsed also ends the listing: it is
    /// indistinguishable from the end of the list and is only logged.
    pub async fn next_page<C: HaloApi>(&mut self, session: &Session<C>) -> Option<ServerPage> {
        let url = self.next.take()?;
        self.pages_fetched += 1;

        match fetch_page(session, &url).await {
            Ok(page) => {
                self.next = page.next_cursor().map(str::to_string);
                Some(page)
            }
            Err(err) => {
                debug!(
                    "Server listing stopped after page {}: {}",
                    self.pages_fetched, err
                );
                None
            }
        }
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

async fn fetch_page<C: HaloApi>(session: &Session<C>, url: &str) -> Result<ServerPage> {
    let body = session.get_json(url).await?;
    Ok(serde_json::from_value(body)?)
}
