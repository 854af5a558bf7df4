//! Page fetching.
//!
//! Extractors depend on the [`PageSource`] capability instead of a concrete
//! HTTP client, so tests can route URLs to canned fixture HTML. The real
//! implementation is a thin wrapper over `reqwest` with a fixed delay
//! between consecutive requests to avoid hammering the agenda site while
//! walking session detail pages.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::{AgendaError, AgendaResult};

/// Delay inserted between consecutive fetches against the real site.
const FETCH_DELAY: Duration = Duration::from_millis(500);

/// A source of page bodies, keyed by URL.
pub trait PageSource: Send + Sync {
    /// Fetch the page at `url` and return its body as text.
    ///
    /// A failure here is fatal for the whole scrape: there is no retry and
    /// no partial result.
    fn fetch(&self, url: &str) -> impl Future<Output = AgendaResult<String>> + Send;
}

/// [`PageSource`] backed by a real HTTP client.
pub struct HttpPageSource {
    client: reqwest::Client,
    delay: Duration,
    fetched_once: AtomicBool,
}

impl HttpPageSource {
    pub fn new() -> Self {
        Self::with_delay(FETCH_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        HttpPageSource {
            client: reqwest::Client::new(),
            delay,
            fetched_once: AtomicBool::new(false),
        }
    }
}

impl Default for HttpPageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> AgendaResult<String> {
        // Rate-limit everything after the first request. Detail pages are
        // fetched sequentially, so this paces the whole run.
        if self.fetched_once.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(self.delay).await;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AgendaError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgendaError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| AgendaError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}
