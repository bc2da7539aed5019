//! Server listing models

use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::client::pagination::PaginationLinks;

/// A monitored host as returned by the server listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    /// Server (agent) ID; servers without one cannot be queried for issues
    #[serde(default, deserialize_with = "super::optional_id")]
    pub id: Option<String>,

    /// Hostname (optional)
    #[serde(default)]
    pub hostname: Option<String>,

    /// Server status, e.g. `active`
    #[serde(default)]
    pub status: Option<String>,
}

impl Server {
    /// Read one entry of a server listing.
    ///
    /// An entry with an unexpected field type keeps whatever of `id`,
    /// `hostname` and `status` is still readable; the other fields are dropped.
    pub fn from_entry(entry: &Value) -> Self {
        Server::deserialize(entry).unwrap_or_else(|err| {
            debug!("Irregular server entry ({}): {}", err, entry);
            Server {
                id: entry
                    .get("id")
                    .and_then(|id| super::optional_id(id).ok().flatten()),
                hostname: text_field(entry, "hostname"),
                status: text_field(entry, "status"),
            }
        })
    }

    /// Whether the server is active, treating an unreported status as active
    pub fn is_active(&self) -> bool {
        self.status.as_deref().is_none_or(|s| s == "active")
    }
}

fn text_field(entry: &Value, name: &str) -> Option<String> {
    entry.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Read every server entry on its own so one irregular entry cannot
/// discard the rest of the page.
fn server_entries<'de, D>(deserializer: D) -> Result<Vec<Server>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.iter().map(Server::from_entry).collect())
}

/// One page of the server listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerPage {
    /// Servers on this page
    #[serde(default, deserialize_with = "server_entries")]
    pub servers: Vec<Server>,

    /// Pagination links
    #[serde(default)]
    pub pagination: Option<PaginationLinks>,
}

impl ServerPage {
    /// Cursor for the following page, if any
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination.as_ref().and_then(|p| p.next.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_page_with_next() {
        let page: ServerPage = serde_json::from_value(serde_json::json!({
            "servers": [
                { "id": "srv1", "hostname": "web-01", "status": "active" },
                { "id": "srv2", "status": "deactivated" }
            ],
            "pagination": { "next": "https://api.test/v2/servers?page=2" }
        }))
        .unwrap();

        assert_eq!(page.servers.len(), 2);
        assert!(page.servers[0].is_active());
        assert!(!page.servers[1].is_active());
        assert_eq!(page.next_cursor(), Some("https://api.test/v2/servers?page=2"));
    }

    #[test]
    fn test_server_page_terminal() {
        let page: ServerPage = serde_json::from_value(serde_json::json!({
            "servers": [],
            "pagination": { "next": null }
        }))
        .unwrap();
        assert_eq!(page.next_cursor(), None);

        let page: ServerPage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.servers.is_empty());
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_irregular_entry_keeps_rest_of_page() {
        let page: ServerPage = serde_json::from_value(serde_json::json!({
            "servers": [
                { "id": "s1", "status": "active" },
                { "id": "s2", "status": "active", "hostname": 42 },
                "not-a-server",
                { "id": "s3", "status": "active" }
            ],
            "pagination": { "next": "https://api.test/v2/servers?page=2" }
        }))
        .unwrap();

        let ids: Vec<_> = page.servers.iter().map(|s| s.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("s1"), Some("s2"), None, Some("s3")]);
        assert_eq!(page.servers[1].hostname, None);
        assert!(page.servers[1].is_active());
        assert_eq!(page.next_cursor(), Some("https://api.test/v2/servers?page=2"));
    }

    #[test]
    fn test_null_server_list_is_empty() {
        let page: ServerPage =
            serde_json::from_value(serde_json::json!({ "servers": null })).unwrap();
        assert!(page.servers.is_empty());
    }

    #[test]
    fn test_server_without_status_counts_as_active() {
        let server: Server = serde_json::from_value(serde_json::json!({ "id": 7 })).unwrap();
        assert_eq!(server.id.as_deref(), Some("7"));
        assert!(server.is_active());
    }
}
