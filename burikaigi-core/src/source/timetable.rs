//! Extractor for the fortee-style timetable grid.
//!
//! The grid carries its start time in a `data-start-at` attribute and one
//! column per track. Two kinds of cells appear in a column:
//!
//! - placeholder "time-slot" cells (registration, breaks) positioned with
//!   an inline `top: NNpx` style and labelled `タイトル（NN分）`
//! - anchor cells linking to a per-session proposal page, which holds the
//!   real metadata (title, room, start, duration, speaker, description)
//!
//! The pixel grid maps 30 px to 15 minutes.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::AgendaResult;
use crate::fetch::PageSource;
use crate::session::Session;
use crate::source::dom::{raw_text, text_of};
use crate::source::{join_url, jst, AgendaSource};

const BASE_URL: &str = "https://fortee.jp";
const TIMETABLE_PATH: &str = "/burikaigi-2025/timetable";

/// Pixel-to-minutes scale of the grid: 30 px per 15 minutes.
const PX_PER_STEP: i64 = 30;
const MINUTES_PER_STEP: i64 = 15;

static GRID: Lazy<Selector> = Lazy::new(|| Selector::parse(".timetable").unwrap());
static TRACK_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse(".track-name").unwrap());
static TRACK_COLUMN: Lazy<Selector> = Lazy::new(|| Selector::parse(".track").unwrap());
static PROPOSAL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".proposal .title").unwrap());
static PROPOSAL_TRACK: Lazy<Selector> = Lazy::new(|| Selector::parse(".proposal .track").unwrap());
static PROPOSAL_SCHEDULE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".proposal .schedule").unwrap());
static PROPOSAL_SPEAKER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".proposal .speaker .name").unwrap());
static PROPOSAL_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".proposal .description").unwrap());

/// `タイトル（NN分）` label on a time-slot cell.
static SLOT_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)（(\d+)分）$").unwrap());
/// `top: NNpx` in a cell's inline style.
static TOP_PX: Lazy<Regex> = Lazy::new(|| Regex::new(r"top:\s*(\d+)px").unwrap());
/// `NN分` duration on a proposal page.
static DURATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)分").unwrap());
/// `YYYY/MM/DD HH:MM` start on a proposal page.
static SCHEDULE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2})\s+(\d{1,2}):(\d{2})").unwrap());

/// The BuriKaigi 2025 timetable hosted on fortee.
pub struct Timetable {
    base_url: String,
}

impl Timetable {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Override the site base URL (tests point this at fixture routes).
    pub fn with_base_url(base_url: &str) -> Self {
        Timetable {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn timetable_url(&self) -> String {
        format!("{}{}", self.base_url, TIMETABLE_PATH)
    }
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgendaSource for Timetable {
    fn calendar_name(&self) -> &str {
        "BuriKaigi 2025"
    }

    fn calendar_description(&self) -> &str {
        "北陸ITエンジニアカンファレンス"
    }

    async fn sessions(&self, pages: &impl PageSource) -> AgendaResult<Vec<Session>> {
        let html = pages.fetch(&self.timetable_url()).await?;
        let cells = parse_timetable(&html, &self.base_url);

        let mut sessions = Vec::with_capacity(cells.len());
        for cell in cells {
            match cell {
                Cell::Slot(session) => sessions.push(session),
                Cell::Entry(url) => {
                    let detail = pages.fetch(&url).await?;
                    sessions.push(parse_proposal(&detail));
                }
            }
        }
        Ok(sessions)
    }
}

/// A grid cell: either a complete placeholder session or a link still to be
/// followed.
enum Cell {
    Slot(Session),
    Entry(String),
}

/// Walk the grid into cells, in column order then document order within a
/// column. Synchronous: the parsed document never crosses an await point.
fn parse_timetable(html: &str, base_url: &str) -> Vec<Cell> {
    let document = Html::parse_document(html);

    let Some(grid) = document.select(&GRID).next() else {
        return Vec::new();
    };
    let grid_start = grid
        .value()
        .attr("data-start-at")
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(day_start);
    let rooms: Vec<String> = grid.select(&TRACK_NAME).map(text_of).collect();

    let mut cells = Vec::new();
    for (index, column) in grid.select(&TRACK_COLUMN).enumerate() {
        let room = rooms.get(index).cloned().unwrap_or_default();
        for cell in column.children().filter_map(ElementRef::wrap) {
            if cell.value().classes().any(|c| c == "time-slot") {
                if let Some(session) = parse_time_slot(cell, grid_start, &room) {
                    cells.push(Cell::Slot(session));
                }
            } else if cell.value().name() == "a" {
                if let Some(href) = cell.value().attr("href") {
                    cells.push(Cell::Entry(join_url(base_url, href)));
                }
            }
        }
    }
    cells
}

/// Turn a placeholder cell into a session, or `None` when its label does
/// not match the `タイトル（NN分）` pattern.
fn parse_time_slot(
    cell: ElementRef<'_>,
    grid_start: DateTime<Utc>,
    room: &str,
) -> Option<Session> {
    let label = text_of(cell);
    let captures = SLOT_LABEL.captures(&label)?;
    let title = captures[1].trim().to_string();
    let minutes: i64 = captures[2].parse().ok()?;

    let offset_px = cell
        .value()
        .attr("style")
        .and_then(|style| TOP_PX.captures(style))
        .and_then(|c| c[1].parse::<i64>().ok())
        .unwrap_or(0);
    let start = grid_start + Duration::minutes(offset_px / PX_PER_STEP * MINUTES_PER_STEP);

    Some(Session {
        title,
        speaker: String::new(),
        start,
        end: start + Duration::minutes(minutes),
        description: String::new(),
        location: room.to_string(),
    })
}

/// Extract a session from a proposal detail page. Missing fields default
/// to empty values; a missing duration defaults the end to start + 10 min.
fn parse_proposal(html: &str) -> Session {
    let document = Html::parse_document(html);

    let first_text = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .map(text_of)
            .unwrap_or_default()
    };

    let title = first_text(&PROPOSAL_TITLE);
    let room = first_text(&PROPOSAL_TRACK);
    let speaker = first_text(&PROPOSAL_SPEAKER);
    let schedule = first_text(&PROPOSAL_SCHEDULE);

    let start = parse_schedule_start(&schedule).unwrap_or_else(day_start);
    let minutes = DURATION
        .captures(&schedule)
        .and_then(|c| c[1].parse::<i64>().ok())
        .unwrap_or(10);
    let end = start + Duration::minutes(minutes);

    let description = document
        .select(&PROPOSAL_DESCRIPTION)
        .next()
        .map(|el| normalize_description(&raw_text(el)))
        .unwrap_or_default();

    Session {
        title: if title.is_empty() {
            speaker.clone()
        } else {
            title
        },
        speaker,
        start,
        end,
        description,
        location: room,
    }
}

/// Parse the `YYYY/MM/DD HH:MM` start out of a proposal's schedule line,
/// interpreted as JST.
fn parse_schedule_start(schedule: &str) -> Option<DateTime<Utc>> {
    let captures = SCHEDULE_START.captures(schedule)?;
    let parse = |i: usize| captures[i].parse::<u32>().ok();

    let date = NaiveDate::from_ymd_opt(captures[1].parse().ok()?, parse(2)?, parse(3)?)?;
    let local = date.and_hms_opt(parse(4)?, parse(5)?, 0)?;
    Some(
        jst()
            .from_local_datetime(&local)
            .single()?
            .with_timezone(&Utc),
    )
}

/// Trim every line and collapse runs of blank lines down to one.
fn normalize_description(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Fallback when the grid start or a proposal start is unparseable:
/// midnight JST on the event date (2025-02-01).
fn day_start() -> DateTime<Utc> {
    // Unwrap safe: literal date
    let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    jst()
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
        .with_timezone(&Utc)
}
