//! Agenda sources.
//!
//! Each conference edition publishes its agenda with a different markup
//! dialect, so extraction lives behind the [`AgendaSource`] capability with
//! one implementation per site layout:
//!
//! - [`SchedulePage`] — the burikaigi.dev single-page nested-list agenda
//! - [`Timetable`] — the fortee-style timetable grid with per-session
//!   detail pages
//!
//! Both share the fetcher and the feed builder. Extraction is defensive
//! throughout: a missing element or attribute substitutes an empty/default
//! value, and only a failed fetch aborts the run.

mod dom;
pub mod schedule_page;
pub mod timetable;

pub use schedule_page::SchedulePage;
pub use timetable::Timetable;

use std::future::Future;

use chrono::FixedOffset;

use crate::error::AgendaResult;
use crate::fetch::PageSource;
use crate::session::Session;

/// A site-specific agenda extractor.
pub trait AgendaSource {
    /// Display name for the generated calendar (`X-WR-CALNAME`).
    fn calendar_name(&self) -> &str;

    /// Description for the generated calendar (`X-WR-CALDESC`).
    fn calendar_description(&self) -> &str;

    /// Fetch and extract the ordered list of sessions.
    fn sessions(
        &self,
        pages: &impl PageSource,
    ) -> impl Future<Output = AgendaResult<Vec<Session>>> + Send;
}

/// The event's local timezone. Both editions take place in Toyama (JST).
pub(crate) fn jst() -> FixedOffset {
    // Unwrap safe: +09:00 is a valid offset
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// Resolve a detail link against the site's base URL.
pub(crate) fn join_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
