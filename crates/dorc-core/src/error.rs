//! Error types for dorc-core

use crate::types::DeletedTag;
use thiserror::Error;

/// Result type alias using dorc-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dorc
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication token is not present in the environment
    #[error("{var} is not set")]
    MissingToken { var: String },

    /// Missing required input (registry, repository)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// The registry could not list tags for a repository
    #[error("could not list tags for {registry}/{repository}: {source}")]
    ListTags {
        registry: String,
        repository: String,
        #[source]
        source: anyhow::Error,
    },

    /// A delete call failed; `deleted` holds what was removed before the failure
    #[error("could not delete tag {registry}.{repository}:{tag}: {source}")]
    DeleteTag {
        registry: String,
        repository: String,
        tag: String,
        deleted: Vec<DeletedTag>,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Create a missing token error
    pub fn missing_token(var: impl Into<String>) -> Self {
        Self::MissingToken { var: var.into() }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create a listing failure error
    pub fn list_tags(
        registry: impl Into<String>,
        repository: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::ListTags {
            registry: registry.into(),
            repository: repository.into(),
            source,
        }
    }

    /// Tags successfully deleted before a deletion failure stopped the run
    pub fn deleted(&self) -> &[DeletedTag] {
        match self {
            Self::DeleteTag { deleted, .. } => deleted,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_tag_message_names_triple() {
        let err = Error::DeleteTag {
            registry: "acme".to_string(),
            repository: "api".to_string(),
            tag: "develop".to_string(),
            deleted: vec![],
            source: anyhow::anyhow!("unexpected status code: 500"),
        };
        assert_eq!(
            err.to_string(),
            "could not delete tag acme.api:develop: unexpected status code: 500"
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            Error::missing_token("DO_TOKEN").to_string(),
            "DO_TOKEN is not set"
        );
    }

    #[test]
    fn test_list_tags_has_no_deleted() {
        let err = Error::list_tags("acme", "api", anyhow::anyhow!("boom"));
        assert!(err.deleted().is_empty());
        assert!(err.to_string().contains("acme/api"));
    }
}
