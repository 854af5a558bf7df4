//! Core library for the BuriKaigi calendar feed.
//!
//! This crate turns the publicly hosted BuriKaigi agenda pages into a list
//! of [`Session`]s and serializes them as an iCalendar feed:
//!
//! - `fetch` — the page-fetching abstraction (real HTTP or test fixtures)
//! - `source` — the per-site extractors for the two agenda layouts
//! - `ics` — the RFC 5545 feed builder

pub mod error;
pub mod fetch;
pub mod ics;
pub mod session;
pub mod source;

pub use error::{AgendaError, AgendaResult};
pub use fetch::{HttpPageSource, PageSource};
pub use session::Session;
pub use source::{AgendaSource, SchedulePage, Timetable};
