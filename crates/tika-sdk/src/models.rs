//! Data models for the Tika SDK

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata returned by `/meta`, keyed by Tika property name
pub type Metadata = HashMap<String, String>;

/// The commonly used subset of a document's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Application-Name", skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(rename = "Author", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl FileInfo {
    /// Pick the known fields out of a metadata mapping.
    ///
    /// Returns `None` when the mapping has no `Content-Type`.
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        let content_type = metadata.get("Content-Type")?.clone();

        Some(Self {
            content_type,
            application_name: metadata.get("Application-Name").cloned(),
            author: metadata.get("Author").cloned(),
        })
    }
}
