//! Configuration file loading and layering
//!
//! Settings are resolved with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (`--config <path>`, or dorc.yaml found from the working directory)
//! 3. Environment variables (DORC_* prefix)
//! 4. CLI flags (applied by the caller)

use crate::error::{Error, Result};
use crate::types::RetentionPolicy;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;
use tracing::debug;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["dorc.yaml", "dorc.yml"];

/// Environment variable holding the DigitalOcean API token
pub const TOKEN_ENV: &str = "DO_TOKEN";

/// Default DigitalOcean API endpoint
pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com";

/// Tags never deleted unless the protected list is overridden
pub const DEFAULT_PROTECTED: &[&str] = &["latest", "main", "master", "prod", "production"];

/// Default number of release tags kept per repository
pub const DEFAULT_KEEP_TAGS: usize = 5;

/// Default minimum age of branch tags before deletion
pub const DEFAULT_MIN_AGE_DAYS: u32 = 30;

/// Resolved cleaner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    /// Registry name
    pub registry: Option<String>,

    /// Repositories to clean, processed in order
    pub repositories: Vec<String>,

    /// Protected tag names (case-insensitive)
    pub protected: Vec<String>,

    /// Release tags to keep per repository
    pub keep_tags: usize,

    /// Minimum age in days before a branch tag is deleted
    pub min_age_days: u32,

    /// Report without deleting
    pub dry_run: bool,

    /// API base URL
    pub api_url: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            registry: None,
            repositories: Vec::new(),
            protected: DEFAULT_PROTECTED.iter().map(|s| s.to_string()).collect(),
            keep_tags: DEFAULT_KEEP_TAGS,
            min_age_days: DEFAULT_MIN_AGE_DAYS,
            dry_run: false,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl CleanerConfig {
    /// Load defaults, the config file and environment overrides
    ///
    /// With an explicit `path` the file must exist. Without one, dorc.yaml is
    /// searched from the working directory upwards and skipped if absent.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::find_config()? {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides()
    }

    /// Parse a config file; missing fields take their defaults
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        debug!("Loading configuration from {}", path);
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Find a config file in the current directory or its parents
    fn find_config() -> Result<Option<Utf8PathBuf>> {
        let cwd = env::current_dir()?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;
        Ok(Self::find_config_from(&cwd))
    }

    fn find_config_from(start: &Utf8Path) -> Option<Utf8PathBuf> {
        let mut current = Some(start);

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    return Some(path);
                }
            }
            current = dir.parent();
        }

        None
    }

    /// Apply DORC_* environment variables from the process environment
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Apply DORC_* overrides using the given variable lookup
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DORC_REGISTRY") {
            self.registry = Some(val);
        }

        if let Some(val) = lookup("DORC_KEEP_TAGS") {
            self.keep_tags = val.trim().parse().map_err(|_| {
                Error::invalid_config("DORC_KEEP_TAGS must be a non-negative number")
            })?;
        }

        if let Some(val) = lookup("DORC_MIN_AGE_DAYS") {
            self.min_age_days = val.trim().parse().map_err(|_| {
                Error::invalid_config("DORC_MIN_AGE_DAYS must be a non-negative number")
            })?;
        }

        if let Some(val) = lookup("DORC_DRY_RUN") {
            self.dry_run = parse_bool(&val)
                .ok_or_else(|| Error::invalid_config("DORC_DRY_RUN must be true or false"))?;
        }

        if let Some(val) = lookup("DORC_API_URL") {
            self.api_url = val;
        }

        Ok(self)
    }

    /// Registry name, required before any network call
    pub fn registry(&self) -> Result<&str> {
        self.registry
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| Error::missing_field("registry"))
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> Result<()> {
        self.registry()?;

        if self.repositories.is_empty() {
            return Err(Error::missing_field("repository"));
        }
        if self.repositories.iter().any(|r| r.trim().is_empty()) {
            return Err(Error::invalid_config("repository name must not be empty"));
        }
        if self.api_url.trim().is_empty() {
            return Err(Error::invalid_config("api_url must not be empty"));
        }

        Ok(())
    }

    /// Retention policy described by this configuration
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::new()
            .with_protected(&self.protected)
            .with_keep_count(self.keep_tags)
            .with_min_age(TimeDelta::days(i64::from(self.min_age_days)))
            .with_dry_run(self.dry_run)
    }

    /// HTTP timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Read the API token from the process environment
pub fn read_token() -> Result<String> {
    token_from(env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String> {
    value
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::missing_token(TOKEN_ENV))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
