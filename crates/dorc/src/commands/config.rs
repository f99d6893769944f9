//! Config command
//!
//! Shows the settings `dorc run` would start from once defaults, the config
//! file and DORC_* variables are layered.

use anyhow::{Context, Result};
use camino::Utf8Path;
use dorc_core::config::{read_token, TOKEN_ENV};
use dorc_core::CleanerConfig;
use serde::Serialize;

use crate::cli::ConfigArgs;
use crate::output;

/// Effective configuration as reported to the user
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    registry: Option<String>,
    repositories: Vec<String>,
    /// Names as matched: lowercased, deduplicated, sorted
    protected: Vec<String>,
    keep_tags: usize,
    min_age_days: u32,
    dry_run: bool,
    api_url: String,
    timeout_secs: Option<u64>,
    token_set: bool,
}

impl EffectiveConfig {
    fn new(config: &CleanerConfig, token_set: bool) -> Self {
        let policy = config.policy();
        Self {
            registry: config.registry.clone(),
            repositories: config.repositories.clone(),
            protected: policy.protected_names().map(str::to_string).collect(),
            keep_tags: config.keep_tags,
            min_age_days: config.min_age_days,
            dry_run: config.dry_run,
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
            token_set,
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let or_none = |items: &[String]| {
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(", ")
            }
        };

        vec![
            (
                "Registry",
                self.registry.clone().unwrap_or_else(|| "(unset)".to_string()),
            ),
            ("Repositories", or_none(&self.repositories)),
            ("Protected", or_none(&self.protected)),
            ("Keep tags", self.keep_tags.to_string()),
            ("Min age", format!("{} days", self.min_age_days)),
            ("Dry run", self.dry_run.to_string()),
            ("API URL", self.api_url.clone()),
            (
                "Timeout",
                self.timeout_secs
                    .map(|s| format!("{}s", s))
                    .unwrap_or_else(|| "none".to_string()),
            ),
            (
                "Token",
                format!(
                    "${} {}",
                    TOKEN_ENV,
                    if self.token_set { "set" } else { "not set" }
                ),
            ),
        ]
    }
}

pub fn run(args: ConfigArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = CleanerConfig::load(config_path).context("Failed to load configuration")?;
    let effective = EffectiveConfig::new(&config, read_token().is_ok());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    output::header("Effective configuration");
    for (key, value) in effective.rows() {
        output::kv(key, &value);
    }

    if let Err(err) = config.validate() {
        println!();
        output::info(&format!("Not ready to run: {}", err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reported() {
        let effective = EffectiveConfig::new(&CleanerConfig::default(), false);

        assert_eq!(effective.registry, None);
        assert_eq!(effective.keep_tags, 5);
        assert_eq!(effective.min_age_days, 30);
        assert_eq!(
            effective.protected,
            vec!["latest", "main", "master", "prod", "production"]
        );
        assert!(!effective.token_set);
    }

    #[test]
    fn test_protected_names_as_matched() {
        let config = CleanerConfig {
            protected: vec!["Stable".to_string(), "stable".to_string(), "Edge".to_string()],
            ..Default::default()
        };

        let effective = EffectiveConfig::new(&config, true);

        assert_eq!(effective.protected, vec!["edge", "stable"]);
    }

    #[test]
    fn test_rows() {
        let config = CleanerConfig {
            registry: Some("acme".to_string()),
            repositories: vec!["api".to_string(), "web".to_string()],
            protected: vec![],
            timeout_secs: Some(30),
            ..Default::default()
        };

        let rows = EffectiveConfig::new(&config, true).rows();
        let value = |key: &str| {
            rows.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("Registry"), "acme");
        assert_eq!(value("Repositories"), "api, web");
        assert_eq!(value("Protected"), "(none)");
        assert_eq!(value("Min age"), "30 days");
        assert_eq!(value("Timeout"), "30s");
        assert_eq!(value("Token"), "$DO_TOKEN set");
    }

    #[test]
    fn test_json_shape() {
        let effective = EffectiveConfig::new(&CleanerConfig::default(), false);
        let json = serde_json::to_value(&effective).unwrap();

        assert_eq!(json["keep_tags"], 5);
        assert_eq!(json["token_set"], false);
        assert!(json["registry"].is_null());
    }
}
