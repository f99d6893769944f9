use crate::error::{RegistryError, Result};
use crate::types::TagsPage;
use dorc_core::config::DEFAULT_API_URL;
use dorc_core::Tag;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!("dorc/", env!("CARGO_PKG_VERSION"));

/// Largest page size the tags endpoint accepts
const PAGE_SIZE: &str = "200";

/// Client for the DigitalOcean Container Registry API
pub struct DigitalOceanClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl DigitalOceanClient {
    /// Create a client for the public DigitalOcean API
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_API_URL)
            .map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", DEFAULT_API_URL, e)))?;

        Ok(Self {
            client: build_client(None)?,
            base_url,
            token: token.into(),
        })
    }

    /// Point the client at a different API endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url =
            Url::parse(base_url).map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(RegistryError::InvalidUrl(base_url.to_string()));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Apply an overall timeout to every request
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(Some(timeout))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List all tags of a repository (handles pagination)
    pub async fn list_tags(&self, registry: &str, repository: &str) -> Result<Vec<Tag>> {
        let mut url = self.endpoint(&["v2", "registry", registry, "repositories", repository, "tags"])?;
        url.query_pairs_mut().append_pair("per_page", PAGE_SIZE);

        let mut all_tags = Vec::new();
        let mut visited = HashSet::new();

        loop {
            debug!("Listing tags from: {}", url);
            visited.insert(url.clone());

            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                return Err(RegistryError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let page: TagsPage = response.json().await.map_err(RegistryError::Decode)?;
            let next = page.next_page().map(str::to_string);
            all_tags.extend(page.tags);

            match next {
                Some(next) => {
                    let next_url = self.next_page_url(&url, &next)?;
                    if visited.contains(&next_url) {
                        return Err(RegistryError::Pagination(format!(
                            "{} was already listed",
                            next_url
                        )));
                    }
                    url = next_url;
                }
                None => break,
            }
        }

        trace!("Found {} tags total", all_tags.len());
        Ok(all_tags)
    }

    /// Delete one tag; only `204 No Content` counts as success
    pub async fn delete_tag(&self, registry: &str, repository: &str, tag: &str) -> Result<()> {
        let url = self.endpoint(&[
            "v2",
            "registry",
            registry,
            "repositories",
            repository,
            "tags",
            tag,
        ])?;

        debug!("Deleting tag: {}", url);

        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Resolve a `next` link against the current page
    ///
    /// The link must stay on the API origin; the bearer token is sent with it.
    fn next_page_url(&self, current: &Url, next: &str) -> Result<Url> {
        let next_url = Url::parse(next)
            .or_else(|_| current.join(next))
            .map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", next, e)))?;

        if next_url.origin() != self.base_url.origin() {
            return Err(RegistryError::Pagination(format!(
                "{} is outside {}",
                next_url,
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(next_url)
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(RegistryError::Client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DigitalOceanClient::new("test-token").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.digitalocean.com/");
        assert_eq!(client.token, "test-token");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = DigitalOceanClient::new("t").unwrap();
        let url = client
            .endpoint(&["v2", "registry", "acme", "repositories", "team/api", "tags", "v1+build"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.digitalocean.com/v2/registry/acme/repositories/team%2Fapi/tags/v1+build"
        );
    }

    #[test]
    fn test_base_url_with_prefix() {
        let client = DigitalOceanClient::new("t")
            .unwrap()
            .with_base_url("http://localhost:8080/proxy/")
            .unwrap();
        let url = client.endpoint(&["v2", "registry", "acme"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v2/registry/acme");
    }

    #[test]
    fn test_next_page_url_resolution() {
        let client = DigitalOceanClient::new("t").unwrap();
        let current = client
            .endpoint(&["v2", "registry", "acme", "repositories", "api", "tags"])
            .unwrap();

        let relative = client.next_page_url(&current, "tags?page=2").unwrap();
        assert_eq!(
            relative.as_str(),
            "https://api.digitalocean.com/v2/registry/acme/repositories/api/tags?page=2"
        );

        let absolute = client
            .next_page_url(
                &current,
                "https://api.digitalocean.com/v2/registry/acme/repositories/api/tags?page=3",
            )
            .unwrap();
        assert_eq!(absolute.query(), Some("page=3"));
    }

    #[test]
    fn test_next_page_url_rejects_other_origin() {
        let client = DigitalOceanClient::new("t").unwrap();
        let current = client.endpoint(&["v2", "registry", "acme"]).unwrap();

        for next in [
            "https://example.com/v2/registry/acme/repositories/api/tags?page=2",
            "http://api.digitalocean.com/v2/registry/acme/repositories/api/tags?page=2",
            "https://api.digitalocean.com:8443/v2/registry/acme/repositories/api/tags?page=2",
        ] {
            let err = client.next_page_url(&current, next).unwrap_err();
            assert!(matches!(err, RegistryError::Pagination(_)), "{}", next);
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let err = DigitalOceanClient::new("t")
            .unwrap()
            .with_base_url("not a url")
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::InvalidUrl(_)));

        let err = DigitalOceanClient::new("t")
            .unwrap()
            .with_base_url("mailto:ops@example.com")
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::InvalidUrl(_)));
    }
}
