//! Release tag classification
//!
//! A tag is a release if its name (after dropping one leading `v`) matches
//! one of three version grammars: semantic, calendar or sequential. Anything
//! else, such as `develop`, `feature-x` or `latest`, is a branch tag.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// SemVer 2.0 grammar (https://semver.org), ASCII digits only
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("semver regex is valid")
});

/// Calendar version: YYYY[YYYY].N with an optional suffix
static CALVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4,8}\.[0-9]+(-[0-9a-zA-Z-]+)?$").expect("calver regex is valid")
});

/// Sequential version: N[.N[.N[.N]]] with an optional suffix
static SEQVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?(\.[0-9]+)?(\.[0-9]+)?(-[0-9a-zA-Z-]+)?$")
        .expect("sequential version regex is valid")
});

/// Version grammar a release tag matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionScheme {
    Semantic,
    Calendar,
    Sequential,
}

impl fmt::Display for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VersionScheme::Semantic => "semver",
            VersionScheme::Calendar => "calver",
            VersionScheme::Sequential => "sequential",
        };
        write!(f, "{}", s)
    }
}

pub fn is_semantic_version(s: &str) -> bool {
    SEMVER_RE.is_match(s)
}

pub fn is_calendar_version(s: &str) -> bool {
    CALVER_RE.is_match(s)
}

pub fn is_sequential_version(s: &str) -> bool {
    SEQVER_RE.is_match(s)
}

/// Return the first version grammar the tag name matches
///
/// Grammars are tried in order: semantic, calendar, sequential.
pub fn classify_version(name: &str) -> Option<VersionScheme> {
    let stripped = name.strip_prefix('v').unwrap_or(name);
    if stripped.is_empty() {
        return None;
    }

    if is_semantic_version(stripped) {
        Some(VersionScheme::Semantic)
    } else if is_calendar_version(stripped) {
        Some(VersionScheme::Calendar)
    } else if is_sequential_version(stripped) {
        Some(VersionScheme::Sequential)
    } else {
        None
    }
}

/// Whether a tag name looks like a release version
pub fn is_release_tag(name: &str) -> bool {
    classify_version(name).is_some()
}
