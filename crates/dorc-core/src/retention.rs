//! Retention planning
//!
//! Splits a repository listing into tags to keep and tags to delete. The
//! computation is pure: `now` is passed in and no registry calls are made.

use crate::classify::classify_version;
use crate::types::{DeletedTag, DeletionReason, RetentionPolicy, Tag, TagCategory};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Keep/delete partition of one repository listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    /// Tags matching the protected list, in listing order
    pub protected: Vec<Tag>,

    /// Non-protected tags kept by the count or age rule
    pub retained: Vec<Tag>,

    /// Release tags beyond the keep count, oldest first
    pub expired_releases: Vec<Tag>,

    /// Branch tags older than the minimum age, in listing order
    pub expired_branches: Vec<Tag>,
}

impl RetentionPlan {
    /// Tags to delete, in deletion order: releases first, then branches
    pub fn deletions(&self) -> impl Iterator<Item = DeletedTag> + '_ {
        let releases = self.expired_releases.iter().map(|tag| DeletedTag {
            tag: tag.clone(),
            reason: DeletionReason::ExpiredRelease,
        });
        let branches = self.expired_branches.iter().map(|tag| DeletedTag {
            tag: tag.clone(),
            reason: DeletionReason::ExpiredBranch,
        });
        releases.chain(branches)
    }

    /// Every tag that is not deleted, protected ones included
    pub fn survivors(&self) -> impl Iterator<Item = &Tag> {
        self.protected.iter().chain(self.retained.iter())
    }

    pub fn deletion_count(&self) -> usize {
        self.expired_releases.len() + self.expired_branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletion_count() == 0
    }
}

/// Compute which tags survive and which are deleted
///
/// Protected tags are never touched. Release tags are only ever removed by
/// the count rule, regardless of age: with `keep_count > 0` the oldest
/// releases beyond the count are expired, ties keeping listing order. Branch
/// tags are expired once they are not newer than `now - min_age`.
pub fn plan_retention(tags: &[Tag], policy: &RetentionPolicy, now: DateTime<Utc>) -> RetentionPlan {
    let mut plan = RetentionPlan::default();
    let mut releases: Vec<&Tag> = Vec::new();

    for tag in tags {
        let category = policy.categorize(tag, now);

        match category {
            TagCategory::Release => match classify_version(&tag.name) {
                Some(scheme) => debug!("{}: {} ({})", tag.name, category, scheme),
                None => debug!("{}: {}", tag.name, category),
            },
            _ => debug!("{}: {}", tag.name, category),
        }

        match category {
            TagCategory::Protected => plan.protected.push(tag.clone()),
            TagCategory::Release => releases.push(tag),
            TagCategory::FreshBranch => plan.retained.push(tag.clone()),
            TagCategory::StaleBranch => plan.expired_branches.push(tag.clone()),
        }
    }

    // Stable sort keeps listing order for equal timestamps
    releases.sort_by_key(|tag| tag.updated_at);

    let expire = if policy.keep_count > 0 && releases.len() > policy.keep_count {
        releases.len() - policy.keep_count
    } else {
        0
    };

    let (expired, kept) = releases.split_at(expire);
    plan.expired_releases = expired.iter().map(|t| (*t).clone()).collect();
    plan.retained.extend(kept.iter().map(|t| (*t).clone()));

    debug!(
        "Plan: {} protected, {} retained, {} expired releases, {} expired branches",
        plan.protected.len(),
        plan.retained.len(),
        plan.expired_releases.len(),
        plan.expired_branches.len()
    );

    plan
}
