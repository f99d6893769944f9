//! Run command

use anyhow::{Context, Result};
use camino::Utf8Path;
use chrono::{SecondsFormat, Utc};
use dorc_core::config::read_token;
use dorc_core::{Cleaner, CleanerConfig, CleanupRun, RepositoryReport};
use dorc_registry::DigitalOceanClient;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use crate::cli::RunArgs;
use crate::output;

/// Row for a deleted tag
#[derive(Tabled)]
struct DeletedTagRow {
    tag: String,
    reason: String,
    #[tabled(rename = "last updated")]
    updated_at: String,
}

pub async fn run(args: RunArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = CleanerConfig::load(config_path).context("Failed to load configuration")?;
    let config = args.apply_to(config);
    config.validate()?;
    let registry = config.registry()?.to_string();

    let token = read_token()?;
    let mut client = DigitalOceanClient::new(token)?
        .with_base_url(&config.api_url)
        .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
    if let Some(timeout) = config.timeout() {
        client = client.with_timeout(timeout)?;
    }

    debug!(
        "Cleaning {} repositories in {} (keep {}, min age {} days)",
        config.repositories.len(),
        registry,
        config.keep_tags,
        config.min_age_days
    );

    let cleaner = Cleaner::new(client, config.policy());
    if let Some(banner) = dry_run_banner(cleaner.policy().dry_run, args.json) {
        output::info(banner);
    }

    let run = cleaner
        .run(&registry, &config.repositories, Utc::now())
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.reports)?);
    } else {
        print_run(&run, config.dry_run);
    }

    match run.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Printed before any repository is processed; JSON output stays a bare array
fn dry_run_banner(dry_run: bool, json: bool) -> Option<&'static str> {
    (dry_run && !json).then_some("Dry run mode: no tags will be deleted")
}

fn print_run(run: &CleanupRun, dry_run: bool) {
    for report in run.reports.iter().filter(|r| !r.is_empty()) {
        output::header(&format!("{}/{}", report.registry, report.repository));
        output::kv("Protected", &report.protected.to_string());
        output::kv("Retained", &report.retained.to_string());

        let mut table = Table::new(deleted_rows(report));
        table.with(Style::sharp());
        println!("{}", table);
    }

    println!();
    if run.is_success() && run.total_deleted() == 0 {
        output::info("No expired tags found");
    } else if run.is_success() {
        output::success(&summary(run, dry_run));
    } else {
        output::error(&summary(run, dry_run));
    }
}

fn deleted_rows(report: &RepositoryReport) -> Vec<DeletedTagRow> {
    report
        .deleted
        .iter()
        .map(|d| DeletedTagRow {
            tag: d.tag.name.clone(),
            reason: d.reason.to_string(),
            updated_at: d.tag.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
        .collect()
}

fn summary(run: &CleanupRun, dry_run: bool) -> String {
    let verb = if dry_run { "Would delete" } else { "Deleted" };
    let total = run.total_deleted();
    let noun = if total == 1 { "tag" } else { "tags" };
    let repositories = run.reports.len();

    let mut line = format!(
        "{} {} {} in {} {}",
        verb,
        total.bold(),
        noun,
        repositories,
        if repositories == 1 {
            "repository"
        } else {
            "repositories"
        }
    );
    if !run.is_success() {
        line.push_str(" before stopping");
    }
    line
}
