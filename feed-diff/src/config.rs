//! Run configuration: source URLs and field comparison rules.

use std::collections::HashSet;
use std::fmt;

/// Fields excluded from comparison entirely, content and subtree alike.
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["color", "season", "description", "variations"];

/// Fields holding URLs, compared ignoring scheme and host.
pub const DEFAULT_URL_FIELDS: &[&str] = &["link", "image", "additional_imageurl"];

/// Keys drawn per sampling band.
pub const DEFAULT_SAMPLES_PER_BAND: usize = 5;

/// Which of the two compared feeds a value or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Live,
    Server,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Live => write!(f, "live"),
            Feed::Server => write!(f, "server"),
        }
    }
}

/// Configuration for one comparison run.
///
/// The core reads no globals; the indexer and flattener take this by
/// reference, so tests can run with different rule sets.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// URL of the live feed.
    pub live_url: String,
    /// URL of the server-generated feed.
    pub server_url: String,
    /// Field tags left out of flattened records entirely.
    pub ignored_fields: HashSet<String>,
    /// Field tags normalized as URLs before comparison.
    pub url_fields: HashSet<String>,
    /// Keys drawn per band when sampling common keys.
    pub samples_per_band: usize,
}

impl CompareConfig {
    /// Creates a configuration with the standard rule sets.
    pub fn new(live_url: String, server_url: String) -> Self {
        CompareConfig {
            live_url,
            server_url,
            ignored_fields: DEFAULT_IGNORED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            url_fields: DEFAULT_URL_FIELDS.iter().map(|s| s.to_string()).collect(),
            samples_per_band: DEFAULT_SAMPLES_PER_BAND,
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig::new(String::new(), String::new())
    }
}
