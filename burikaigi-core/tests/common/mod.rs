//! Shared test support: a fixture-backed page source.

use burikaigi_core::error::AgendaResult;
use burikaigi_core::fetch::PageSource;

/// Routes URLs to canned fixture HTML. The first route whose key matches
/// the URL exactly or as a prefix wins, so register the more specific
/// routes first.
pub struct FixtureSource {
    routes: Vec<(&'static str, &'static str)>,
}

impl FixtureSource {
    pub fn new(routes: Vec<(&'static str, &'static str)>) -> Self {
        FixtureSource { routes }
    }
}

impl PageSource for FixtureSource {
    async fn fetch(&self, url: &str) -> AgendaResult<String> {
        let body = self
            .routes
            .iter()
            .find(|(key, _)| url == *key || url.starts_with(key))
            .map(|(_, body)| body.to_string())
            .unwrap_or_else(|| panic!("no fixture registered for {}", url));
        Ok(body)
    }
}
