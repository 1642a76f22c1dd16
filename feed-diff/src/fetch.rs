//! HTTP retrieval of feed documents.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

/// Some feed origins reject clients without a browser-like agent string.
pub const USER_AGENT: &str = "Mozilla/5.0";
/// Large feeds can take a while to generate server side.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Blocking HTTP client for feed downloads. Comparison runs strictly
/// sequentially, so there is nothing to gain from async here.
pub struct FeedFetcher {
    client: reqwest::blocking::Client,
}

impl FeedFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(Error::Client)?;
        Ok(FeedFetcher { client })
    }

    /// Downloads one document. Network failures, timeouts, and non-success
    /// status codes are all fatal. The body is decoded as UTF-8 with
    /// invalid sequences replaced, never rejected.
    pub fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "fetching feed");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;
        let body = response.bytes().map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;
        debug!(url = %url, bytes = body.len(), "fetched feed");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
