//! Server group models

use serde::Deserialize;

/// A node of the server group hierarchy.
///
/// Groups arrive as a flat list; the hierarchy is implied by `parent_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    /// Group ID
    #[serde(deserialize_with = "super::id")]
    pub id: String,

    /// Group name
    #[serde(default)]
    pub name: String,

    /// Group tag (optional)
    #[serde(default)]
    pub tag: Option<String>,

    /// Parent group ID; `None` for a root group
    #[serde(default, deserialize_with = "super::optional_id")]
    pub parent_id: Option<String>,

    /// Whether the group declares child groups
    #[serde(default)]
    pub has_children: bool,
}

impl Group {
    /// Whether this group sits at the top of the hierarchy
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Response body of the group listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GroupList {
    /// Total group count reported by the API
    #[serde(default)]
    pub count: Option<usize>,

    /// The groups; absent when the response is malformed
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}
