//! Registry tag types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single image tag in a registry repository
///
/// Field names follow the DigitalOcean registry API so a listing response can
/// be deserialized directly. Only `name` and `updated_at` are used for
/// retention decisions; the remaining fields are carried through for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name (e.g., "v1.2.3", "develop")
    #[serde(rename = "tag")]
    pub name: String,

    /// Last modification time as reported by the registry
    pub updated_at: DateTime<Utc>,

    /// Digest of the manifest the tag points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_digest: Option<String>,

    /// Compressed image size in bytes
    #[serde(
        default,
        rename = "compressed_size_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub compressed_size: Option<u64>,

    /// Uncompressed image size in bytes
    #[serde(default, rename = "size_bytes", skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Tag {
    /// Create a tag with only the fields the retention engine inspects
    pub fn new(name: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            updated_at,
            manifest_digest: None,
            compressed_size: None,
            size: None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Category a tag falls into during retention planning
///
/// Every tag lands in exactly one category. The protected check runs first,
/// then release classification, then the age check for branch tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagCategory {
    /// Name matches the protected list; never deleted
    Protected,
    /// Name matches a version grammar; subject to the count rule only
    Release,
    /// Branch tag updated within the minimum age
    FreshBranch,
    /// Branch tag older than the minimum age; deleted
    StaleBranch,
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagCategory::Protected => "protected",
            TagCategory::Release => "release",
            TagCategory::FreshBranch => "fresh-branch",
            TagCategory::StaleBranch => "stale-branch",
        };
        write!(f, "{}", s)
    }
}
