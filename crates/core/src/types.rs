//! Album metadata as written by the album editor.
//!
//! The editor owns `album.json`; this service only reads it. Wire names are
//! camelCase and most fields are defaulted so that editor-side additions do
//! not break publishing. The publish flow re-uploads the raw fetched bytes,
//! so fields unknown to this struct still reach the published site.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Album visibility as stored by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// One photo belonging to an album.
///
/// `key` is relative to the owner-scoped storage prefix
/// (`private/<identityId>/`), never absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: String,
    pub key: String,
}

/// Album metadata document (`album.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
    /// Template choice (e.g. `"Minimal"`, `"Grid"`).
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub cover_id: Option<String>,
    /// Ordered photo references; order is the display order.
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub owner_identity_id: Option<String>,
}
