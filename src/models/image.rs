use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly generated image, before or just after persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
    pub url: String,
    pub prompt: String,
}

impl NewImage {
    pub fn new(url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self { url: url.into(), prompt: prompt.into() }
    }

    /// Both fields must be non-empty before the record may be stored.
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.prompt.trim().is_empty()
    }
}

/// A persisted gallery entry as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}
