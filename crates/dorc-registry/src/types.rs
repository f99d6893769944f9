//! DigitalOcean registry API response types

use dorc_core::Tag;
use serde::Deserialize;

/// One page of `GET /v2/registry/{registry}/repositories/{repository}/tags`
#[derive(Debug, Deserialize)]
pub(crate) struct TagsPage {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    #[serde(default)]
    pub pages: Pages,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pages {
    #[serde(default)]
    pub next: Option<String>,
}

impl TagsPage {
    /// Absolute URL of the next page, if any
    pub fn next_page(&self) -> Option<&str> {
        self.links.pages.next.as_deref().filter(|u| !u.is_empty())
    }
}
