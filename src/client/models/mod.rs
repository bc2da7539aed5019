//! Halo API data models
//!
//! Only the fields the report relies on are modelled. Issue listings and
//! issue details are emitted verbatim, so they stay `serde_json::Value`.

mod auth;
mod group;
mod issue;
mod server;

pub use auth::AccessToken;
pub use group::{Group, GroupList};
pub use issue::{IssueRef, ScanType};
pub use server::{Server, ServerPage};

use serde::{Deserialize, Deserializer};

/// Identifier that the API may send as either a JSON string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize a required id into a `String`.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Deserialize a nullable id into an `Option<String>`.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
