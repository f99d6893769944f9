//! # dorc-core
//!
//! Core library for dorc, the container registry tag cleaner:
//! - Release tag classification (semantic, calendar and sequential versions)
//! - Retention planning from protected names, a keep count and a minimum age
//! - The cleanup driver that lists and deletes tags through a [`TagRegistry`]
//! - Layered configuration (defaults, dorc.yaml, DORC_* environment)

pub mod classify;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod retention;
pub mod types;

pub use classify::{classify_version, is_release_tag, VersionScheme};
pub use cleaner::{Cleaner, RegistryFuture, TagRegistry};
pub use config::CleanerConfig;
pub use error::{Error, Result};
pub use retention::{plan_retention, RetentionPlan};
pub use types::{
    CleanupRun, DeletedTag, DeletionReason, RepositoryReport, RetentionPolicy, Tag, TagCategory,
};
