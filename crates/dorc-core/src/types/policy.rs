//! Retention policy

use crate::classify::is_release_tag;
use crate::types::{Tag, TagCategory};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeSet;

/// Retention rules applied to one repository listing
///
/// Immutable for the duration of a run. Protected names are stored
/// lowercased so lookups are case-insensitive exact matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    protected: BTreeSet<String>,

    /// Number of most recent release tags always kept (0 disables the count rule)
    pub keep_count: usize,

    /// Branch tags updated more recently than this are kept
    pub min_age: TimeDelta,

    /// Compute and report deletions without issuing them
    pub dry_run: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            protected: BTreeSet::new(),
            keep_count: 0,
            min_age: TimeDelta::zero(),
            dry_run: false,
        }
    }
}

impl RetentionPolicy {
    /// Create an empty policy: nothing protected, no count floor, no minimum age
    pub fn new() -> Self {
        Self::default()
    }

    /// Add protected tag names
    pub fn with_protected<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.protected
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Set the number of release tags to keep
    pub fn with_keep_count(mut self, keep_count: usize) -> Self {
        self.keep_count = keep_count;
        self
    }

    /// Set the minimum age before a branch tag may be deleted
    pub fn with_min_age(mut self, min_age: TimeDelta) -> Self {
        self.min_age = min_age;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Protected names (lowercased, sorted)
    pub fn protected_names(&self) -> impl Iterator<Item = &str> {
        self.protected.iter().map(String::as_str)
    }

    /// Case-insensitive exact match against the protected list
    pub fn is_protected(&self, name: &str) -> bool {
        self.protected.contains(&name.to_lowercase())
    }

    /// Branch tags updated strictly after this instant are still fresh
    pub fn fresh_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.min_age)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Assign a tag to its category
    pub fn categorize(&self, tag: &Tag, now: DateTime<Utc>) -> TagCategory {
        if self.is_protected(&tag.name) {
            TagCategory::Protected
        } else if is_release_tag(&tag.name) {
            TagCategory::Release
        } else if tag.updated_at > self.fresh_after(now) {
            TagCategory::FreshBranch
        } else {
            TagCategory::StaleBranch
        }
    }
}
