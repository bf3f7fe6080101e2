// src/models.rs

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// --- TEMPLATE MODELS ---

/// One run of a parsed path template: either literal path text or a named
/// `{token}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

// --- CANDIDATE MODELS ---

/// A token value extracted from a matched filesystem path.
///
/// Values that parse as an unsigned integer compare numerically; everything
/// else compares lexically. A numeric value always outranks a textual one so
/// that e.g. a numbered release beats an oddly named build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Number(u64),
    Text(String),
}

impl TokenValue {
    /// Classifies a captured string as numeric or textual.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl Ord for TokenValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for TokenValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One concrete, filesystem-verified resolution of a template: the matched
/// executable path, the version string rendered from the probe region, and
/// the token values that produced it.
///
/// Candidates are created during scanning, ranked, tagged, and discarded
/// after a launch decision. They are never built from unresolved templates.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub version: String,
    pub tokens: HashMap<String, TokenValue>,
    /// Ranking tags (`default`, `latest`, or a pre-release token name),
    /// assigned after sorting.
    pub tags: Vec<String>,
}

impl Candidate {
    /// True if the candidate carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// --- CONFIGURATION MODELS ---

/// Explicit resolver configuration, passed into [`crate::core::resolver::Resolver`]
/// at construction. The CLI layer assembles this from flags and the
/// `APPFIND_*` environment variables; nothing below the CLI reads the
/// environment directly.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Raw template strings, in configuration order.
    pub templates: Vec<String>,
    /// Token precedence for ranking, most significant first. Empty means
    /// "derive from the order tokens first appear in the templates".
    pub sort_order: Vec<String>,
    /// Token names whose presence marks a candidate as pre-release.
    pub prerelease_tokens: Vec<String>,
    /// Version string that should receive the `default` tag instead of the
    /// latest release.
    pub default_version: Option<String>,
}
