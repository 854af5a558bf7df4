//! iCalendar feed generation.
//!
//! Builds one RFC 5545 calendar from a session list. Output is fully
//! deterministic: UIDs are derived from session fields and DTSTAMP is
//! pinned to the session start, so identical input HTML produces
//! byte-identical feeds.

use icalendar::{Calendar, Component, Event, EventLike};

use crate::session::Session;

/// Serialize `sessions` as iCalendar text (CRLF line endings, UTF-8).
pub fn to_ical(name: &str, description: &str, sessions: &[Session]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(name);
    calendar.description(description);

    for session in sessions {
        let mut event = Event::new();
        event.uid(&session.uid());
        event.summary(&session.title);

        // Timestamps carry explicit time-of-day, in UTC
        event.add_property("DTSTART", format_utc(session));
        event.add_property("DTEND", session.end.format("%Y%m%dT%H%M%SZ").to_string());
        event.add_property("DTSTAMP", format_utc(session));

        event.description(&format!(
            "<b>Speaker:</b>\n{}\n\n<b>Description:</b>\n{}",
            session.speaker, session.description
        ));
        if !session.location.is_empty() {
            event.location(&session.location);
        }

        calendar.push(event.done());
    }

    calendar.done().to_string()
}

fn format_utc(session: &Session) -> String {
    session.start.format("%Y%m%dT%H%M%SZ").to_string()
}
