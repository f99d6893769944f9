//! Common test infrastructure for dorc-core tests
//!
//! Provides an in-memory [`TagRegistry`] that serves fixed listings per
//! repository and records every delete call, plus tag fixture helpers.

#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use dorc_core::{RegistryFuture, Tag, TagRegistry};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const REGISTRY: &str = "acme";

/// Fixed reference instant for all fixtures
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn tag_days_old(name: &str, days: i64) -> Tag {
    Tag::new(name, now() - TimeDelta::days(days))
}

pub fn tag_at(name: &str, updated_at: DateTime<Utc>) -> Tag {
    Tag::new(name, updated_at)
}

pub fn names<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Vec<String> {
    tags.into_iter().map(|t| t.name.clone()).collect()
}

/// In-memory registry
#[derive(Default)]
pub struct MockRegistry {
    listings: HashMap<String, Vec<Tag>>,
    failing_listings: HashSet<String>,
    failing_deletes: HashSet<String>,
    list_calls: Mutex<Vec<String>>,
    delete_calls: Mutex<Vec<(String, String, String)>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `tags` for `repository`
    pub fn with_repository(mut self, repository: &str, tags: Vec<Tag>) -> Self {
        self.listings.insert(repository.to_string(), tags);
        self
    }

    /// Make listing `repository` fail
    pub fn fail_listing(mut self, repository: &str) -> Self {
        self.failing_listings.insert(repository.to_string());
        self
    }

    /// Make deleting `tag` fail in any repository
    pub fn fail_delete(mut self, tag: &str) -> Self {
        self.failing_deletes.insert(tag.to_string());
        self
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<(String, String, String)> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Tag names deleted, in call order
    pub fn deleted_names(&self) -> Vec<String> {
        self.delete_calls()
            .into_iter()
            .map(|(_, _, tag)| tag)
            .collect()
    }
}

impl TagRegistry for MockRegistry {
    fn list_tags<'a>(
        &'a self,
        registry: &'a str,
        repository: &'a str,
    ) -> RegistryFuture<'a, Vec<Tag>> {
        Box::pin(async move {
            assert_eq!(registry, REGISTRY);
            self.list_calls.lock().unwrap().push(repository.to_string());

            if self.failing_listings.contains(repository) {
                anyhow::bail!("unexpected status code: 500");
            }
            Ok(self.listings.get(repository).cloned().unwrap_or_default())
        })
    }

    fn delete_tag<'a>(
        &'a self,
        registry: &'a str,
        repository: &'a str,
        tag: &'a str,
    ) -> RegistryFuture<'a, ()> {
        Box::pin(async move {
            self.delete_calls.lock().unwrap().push((
                registry.to_string(),
                repository.to_string(),
                tag.to_string(),
            ));

            if self.failing_deletes.contains(tag) {
                anyhow::bail!("unexpected status code: 404");
            }
            Ok(())
        })
    }
}
