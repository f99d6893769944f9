//! Common test infrastructure for dorc-registry tests
//!
//! Wiremock helpers that mimic the DigitalOcean registry tag endpoints.

#![allow(dead_code)]

use dorc_registry::DigitalOceanClient;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const REGISTRY: &str = "acme";

pub fn tags_path(registry: &str, repository: &str) -> String {
    format!("/v2/registry/{}/repositories/{}/tags", registry, repository)
}

pub fn tag_path(registry: &str, repository: &str, tag: &str) -> String {
    format!("{}/{}", tags_path(registry, repository), tag)
}

/// Registry tag JSON as the API returns it
pub fn tag_json(name: &str, updated_at: &str) -> Value {
    json!({
        "registry_name": REGISTRY,
        "repository": "api",
        "tag": name,
        "manifest_digest": "sha256:test",
        "compressed_size_bytes": 12345678,
        "size_bytes": 12345678,
        "updated_at": updated_at
    })
}

/// A client pointed at the mock server
pub fn client_for(server: &MockServer) -> DigitalOceanClient {
    DigitalOceanClient::new(TOKEN)
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap()
}

/// Serve a single-page listing
pub async fn mock_list(server: &MockServer, repository: &str, tags: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(tags_path(REGISTRY, repository)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": tags,
            "meta": {"total": 0},
            "links": {}
        })))
        .mount(server)
        .await;
}

/// Serve one page of a paginated listing; `page: None` is the first request
pub async fn mock_list_page(
    server: &MockServer,
    repository: &str,
    page: Option<&str>,
    tags: Vec<Value>,
    next: Option<String>,
) {
    let links = match next {
        Some(next) => json!({"pages": {"next": next}}),
        None => json!({}),
    };
    let mock = Mock::given(method("GET")).and(path(tags_path(REGISTRY, repository)));
    let mock = match page {
        Some(page) => mock.and(query_param("page", page)),
        None => mock.and(query_param_is_missing("page")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": tags,
            "links": links
        })))
        .mount(server)
        .await;
}

/// Accept a delete with the given status
pub async fn mock_delete(server: &MockServer, repository: &str, tag: &str, status: u16) {
    Mock::given(method("DELETE"))
        .and(path(tag_path(REGISTRY, repository, tag)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}
