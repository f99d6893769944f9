//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use dorc_core::CleanerConfig;

/// dorc - Retention-based tag cleanup for DigitalOcean container registries
#[derive(Parser, Debug)]
#[command(name = "dorc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to dorc.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete expired tags from registry repositories
    Run(RunArgs),

    /// Show the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Registry name
    #[arg(long)]
    pub registry: Option<String>,

    /// Repository to clean (repeatable, processed in order)
    #[arg(long = "repository", value_name = "NAME")]
    pub repositories: Vec<String>,

    /// Protected tag name (repeatable, replaces the default list)
    #[arg(long = "protect", value_name = "TAG")]
    pub protected: Vec<String>,

    /// Number of release tags to keep per repository
    #[arg(long, value_name = "N")]
    pub keep_tags: Option<usize>,

    /// Minimum age in days before a branch tag is deleted
    #[arg(long, value_name = "DAYS")]
    pub min_age_days: Option<u32>,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Layer the flags given on the command line over a loaded configuration
    pub fn apply_to(&self, mut config: CleanerConfig) -> CleanerConfig {
        if let Some(registry) = &self.registry {
            config.registry = Some(registry.clone());
        }
        if !self.repositories.is_empty() {
            config.repositories = self.repositories.clone();
        }
        if !self.protected.is_empty() {
            config.protected = self.protected.clone();
        }
        if let Some(keep) = self.keep_tags {
            config.keep_tags = keep;
        }
        if let Some(days) = self.min_age_days {
            config.min_age_days = days;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        config
    }
}

// Config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}
