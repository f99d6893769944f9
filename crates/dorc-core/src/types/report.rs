//! Cleanup report types

use crate::error::Error;
use crate::types::Tag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which retention rule expired a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletionReason {
    /// Release tag beyond the keep count
    ExpiredRelease,
    /// Branch tag older than the minimum age
    ExpiredBranch,
}

impl fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionReason::ExpiredRelease => write!(f, "release"),
            DeletionReason::ExpiredBranch => write!(f, "branch"),
        }
    }
}

/// A tag that was deleted (or would be, in dry-run mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTag {
    pub tag: Tag,
    pub reason: DeletionReason,
}

/// Outcome of cleaning a single repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub registry: String,
    pub repository: String,
    pub dry_run: bool,

    /// Deleted tags in deletion order: releases first, then branches
    pub deleted: Vec<DeletedTag>,

    /// Number of tags skipped by the protected list
    pub protected: usize,

    /// Number of non-protected tags kept by the count or age rule
    pub retained: usize,
}

impl RepositoryReport {
    /// Empty report for a repository
    pub fn new(registry: impl Into<String>, repository: impl Into<String>, dry_run: bool) -> Self {
        Self {
            registry: registry.into(),
            repository: repository.into(),
            dry_run,
            deleted: Vec::new(),
            protected: 0,
            retained: 0,
        }
    }

    /// Deleted tags, in deletion order
    pub fn deleted_tags(&self) -> impl Iterator<Item = &Tag> {
        self.deleted.iter().map(|d| &d.tag)
    }

    /// Deleted release tags
    pub fn expired_releases(&self) -> impl Iterator<Item = &Tag> {
        self.deleted_with(DeletionReason::ExpiredRelease)
    }

    /// Deleted branch tags
    pub fn expired_branches(&self) -> impl Iterator<Item = &Tag> {
        self.deleted_with(DeletionReason::ExpiredBranch)
    }

    fn deleted_with(&self, reason: DeletionReason) -> impl Iterator<Item = &Tag> {
        self.deleted
            .iter()
            .filter(move |d| d.reason == reason)
            .map(|d| &d.tag)
    }

    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
    }
}

/// Result of a run over one or more repositories
///
/// Repositories are processed in order and the run stops at the first
/// failure. `reports` holds every repository that was processed, including
/// a partial report for the failing one when it failed during deletion.
#[derive(Debug, Default)]
pub struct CleanupRun {
    pub reports: Vec<RepositoryReport>,
    pub error: Option<Error>,
}

impl CleanupRun {
    /// Total number of deleted tags across all repositories
    pub fn total_deleted(&self) -> usize {
        self.reports.iter().map(|r| r.deleted.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, keeping the reports on success
    pub fn into_result(self) -> Result<Vec<RepositoryReport>, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.reports),
        }
    }
}
