//! Error types for feed comparison.

use thiserror::Error;

use crate::config::Feed;

/// Result type alias for feed comparison operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a comparison run.
#[derive(Error, Debug)]
pub enum Error {
    /// The named feed is not well-formed XML.
    #[error("{feed} feed: XML parse error: {reason}")]
    Parse { feed: Feed, reason: String },

    /// Transport failure while fetching a feed: connection error, timeout
    /// or a non-success status.
    #[error("fetch of {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}
