//! Error types for agenda scraping.
//!
//! Only fetch failures are errors: a failed request aborts the whole run.
//! Missing elements or unmatched field patterns during extraction are
//! recovered locally with defaults and never surface here.

use thiserror::Error;

/// Errors that abort an agenda scrape.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
