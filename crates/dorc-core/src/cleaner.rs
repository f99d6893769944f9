//! Cleanup driver
//!
//! Lists a repository through a [`TagRegistry`], plans retention, and issues
//! deletions one at a time. The first failed delete stops the repository and
//! the run.

use crate::error::{Error, Result};
use crate::retention::{plan_retention, RetentionPlan};
use crate::types::{CleanupRun, RepositoryReport, RetentionPolicy, Tag};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

/// Boxed future returned by [`TagRegistry`] operations
pub type RegistryFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

/// Remote operations the cleaner needs from a container registry.
///
/// This keeps dorc-core independent of the HTTP client. The production
/// implementation lives in dorc-registry; tests provide in-memory mocks.
pub trait TagRegistry: Send + Sync {
    /// List every tag in a repository. Implementations must return the
    /// complete listing, following pagination if the API has any.
    fn list_tags<'a>(&'a self, registry: &'a str, repository: &'a str)
        -> RegistryFuture<'a, Vec<Tag>>;

    /// Delete exactly one tag
    fn delete_tag<'a>(
        &'a self,
        registry: &'a str,
        repository: &'a str,
        tag: &'a str,
    ) -> RegistryFuture<'a, ()>;
}

/// Applies a [`RetentionPolicy`] to registry repositories
pub struct Cleaner<R> {
    registry_client: R,
    policy: RetentionPolicy,
}

impl<R: TagRegistry> Cleaner<R> {
    pub fn new(registry_client: R, policy: RetentionPolicy) -> Self {
        Self {
            registry_client,
            policy,
        }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    pub fn registry_client(&self) -> &R {
        &self.registry_client
    }

    /// List a repository and compute its retention plan without deleting anything
    pub async fn plan(
        &self,
        registry: &str,
        repository: &str,
        now: DateTime<Utc>,
    ) -> Result<RetentionPlan> {
        let tags = self
            .registry_client
            .list_tags(registry, repository)
            .await
            .map_err(|e| Error::list_tags(registry, repository, e))?;

        debug!("Listed {} tags in {}/{}", tags.len(), registry, repository);

        Ok(plan_retention(&tags, &self.policy, now))
    }

    /// Clean a single repository
    ///
    /// Returns the deleted tags in deletion order. In dry-run mode the same
    /// tags are reported but no delete call is made.
    pub async fn clean_repository(
        &self,
        registry: &str,
        repository: &str,
        now: DateTime<Utc>,
    ) -> Result<RepositoryReport> {
        let plan = self.plan(registry, repository, now).await?;
        let (report, error) = self.execute(registry, repository, &plan).await;
        match error {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    /// Clean several repositories of one registry, in order
    ///
    /// Stops at the first failing repository; later repositories are not
    /// touched. Reports for processed repositories are always returned.
    pub async fn run(
        &self,
        registry: &str,
        repositories: &[String],
        now: DateTime<Utc>,
    ) -> CleanupRun {
        let mut run = CleanupRun::default();

        if self.policy.dry_run {
            debug!("Dry run: no tags will be deleted");
        }

        for repository in repositories {
            let plan = match self.plan(registry, repository, now).await {
                Ok(plan) => plan,
                Err(err) => {
                    run.error = Some(err);
                    break;
                }
            };

            let (report, error) = self.execute(registry, repository, &plan).await;
            info!(
                "{}/{}: {} deleted, {} retained, {} protected",
                registry,
                repository,
                report.deleted.len(),
                report.retained,
                report.protected
            );
            run.reports.push(report);

            if let Some(err) = error {
                run.error = Some(err);
                break;
            }
        }

        run
    }

    async fn execute(
        &self,
        registry: &str,
        repository: &str,
        plan: &RetentionPlan,
    ) -> (RepositoryReport, Option<Error>) {
        let mut report = RepositoryReport::new(registry, repository, self.policy.dry_run);
        report.protected = plan.protected.len();
        report.retained = plan.retained.len();

        for deletion in plan.deletions() {
            if self.policy.dry_run {
                info!(
                    "Would delete {} tag {}:{}",
                    deletion.reason, repository, deletion.tag.name
                );
            } else {
                if let Err(source) = self
                    .registry_client
                    .delete_tag(registry, repository, &deletion.tag.name)
                    .await
                {
                    let err = Error::DeleteTag {
                        registry: registry.to_string(),
                        repository: repository.to_string(),
                        tag: deletion.tag.name.clone(),
                        deleted: report.deleted.clone(),
                        source,
                    };
                    return (report, Some(err));
                }
                info!(
                    "Deleted {} tag {}:{}",
                    deletion.reason, repository, deletion.tag.name
                );
            }
            report.deleted.push(deletion);
        }

        (report, None)
    }
}
