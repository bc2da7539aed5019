//! Issue models

use serde::Deserialize;

/// Category of security scan that produces issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ScanType {
    /// File integrity monitoring
    Fim,
    /// Configuration security monitoring
    Csm,
    /// Software vulnerability monitoring
    Svm,
}

impl ScanType {
    /// Value used by the `issue_type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Fim => "fim",
            ScanType::Csm => "csm",
            ScanType::Svm => "svm",
        }
    }

    /// Join scan types into the comma-separated form the API expects
    pub fn join(types: &[ScanType]) -> String {
        types
            .iter()
            .map(ScanType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The part of an issue-list entry needed to fetch its detail record
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    #[serde(default, deserialize_with = "super::optional_id")]
    pub id: Option<String>,
}

impl IssueRef {
    /// Extract issue references from an issue-list payload, in listing order.
    ///
    /// Entries that cannot be read as an issue yield a reference without an id.
    pub fn from_listing(listing: &serde_json::Value) -> Vec<IssueRef> {
        listing
            .get("issues")
            .and_then(|issues| issues.as_array())
            .map(|issues| {
                issues
                    .iter()
                    .map(|issue| {
                        IssueRef::deserialize(issue).unwrap_or(IssueRef { id: None })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
