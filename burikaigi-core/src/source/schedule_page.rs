//! Extractor for the burikaigi.dev single-page agenda.
//!
//! The schedule is one page of nested lists: `h3` track headers with a room
//! label as the following sibling, then a `ul` of session items. Each item
//! carries one or two `time` labels, an `h4` speaker label, an optional
//! title (plain text or a link to a detail page) and an optional
//! organization label. Descriptions live on the linked detail pages.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::AgendaResult;
use crate::fetch::PageSource;
use crate::session::Session;
use crate::source::dom::{
    child_element_count, last_child_element, next_element, parent_element, raw_text, text_of,
};
use crate::source::{join_url, jst, AgendaSource};

const BASE_URL: &str = "https://burikaigi.dev";

/// Agenda items whose speaker label is this marker are breaks, never emitted.
const BREAK_LABEL: &str = "休憩";

static SCHEDULE: Lazy<Selector> = Lazy::new(|| Selector::parse("#schedule").unwrap());
static TRACK_HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static SPEAKER: Lazy<Selector> = Lazy::new(|| Selector::parse("h4").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static SESSION_INFO: Lazy<Selector> = Lazy::new(|| Selector::parse(".session--info > *").unwrap());

/// The BuriKaigi 2024 agenda at burikaigi.dev.
pub struct SchedulePage {
    base_url: String,
}

impl SchedulePage {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Override the site base URL (tests point this at fixture routes).
    pub fn with_base_url(base_url: &str) -> Self {
        SchedulePage {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SchedulePage {
    fn default() -> Self {
        Self::new()
    }
}

impl AgendaSource for SchedulePage {
    fn calendar_name(&self) -> &str {
        "BuriKaigi"
    }

    fn calendar_description(&self) -> &str {
        "北陸ITエンジニアカンファレンス"
    }

    async fn sessions(&self, pages: &impl PageSource) -> AgendaResult<Vec<Session>> {
        let html = pages.fetch(&self.base_url).await?;
        let items = parse_schedule(&html, &self.base_url);

        let mut sessions = Vec::with_capacity(items.len());
        for item in items {
            let description = match &item.detail_url {
                Some(url) => extract_description(&pages.fetch(url).await?),
                None => String::new(),
            };
            sessions.push(item.into_session(description));
        }
        Ok(sessions)
    }
}

/// One `li` item, before the detail page has been fetched.
struct ScheduleItem {
    track: String,
    room: String,
    speaker: String,
    /// Distinct title, or empty when the item only has a speaker label.
    title: String,
    organization: Option<String>,
    detail_url: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ScheduleItem {
    /// Apply the site's field composition rules.
    ///
    /// Items without a distinct title (opening, closing, teardown) use the
    /// speaker label as the title and emit an empty speaker. An affiliation
    /// is appended to the speaker in parentheses when present.
    fn into_session(self, description: String) -> Session {
        let organization = self
            .organization
            .map(|o| format!(" ({})", o))
            .unwrap_or_default();
        let speaker = if self.title.is_empty() {
            organization
        } else {
            format!("{}{}", self.speaker, organization)
        };
        let title = if self.title.is_empty() {
            self.speaker
        } else {
            self.title
        };

        Session {
            title,
            speaker,
            start: self.start,
            end: self.end,
            description,
            location: format!("{} ({})", self.track, self.room),
        }
    }
}

/// Walk the schedule markup into raw items. Synchronous on purpose: the
/// parsed document never crosses an await point.
fn parse_schedule(html: &str, base_url: &str) -> Vec<ScheduleItem> {
    let document = Html::parse_document(html);

    let Some(schedule) = document.select(&SCHEDULE).next() else {
        return Vec::new();
    };
    // The track headers sit two wrapper elements down from the section root.
    let Some(content) = last_child_element(schedule).and_then(last_child_element) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for header in content.select(&TRACK_HEADER) {
        let track = text_of(header);
        let room = next_element(header).map(text_of).unwrap_or_default();

        // The session list is the sibling of the header's wrapper element.
        let Some(list) = parent_element(header).and_then(next_element) else {
            continue;
        };

        for item in list.select(&LIST_ITEM) {
            let speaker_el = item.select(&SPEAKER).next();
            let speaker = speaker_el.map(text_of).unwrap_or_default();
            if speaker == BREAK_LABEL {
                continue;
            }

            let times: Vec<DateTime<Utc>> = item
                .select(&TIME)
                .filter_map(|t| parse_time(&text_of(t)))
                .collect();
            let start = times.first().copied().unwrap_or_else(day_start);
            let end = times
                .get(1)
                .copied()
                .unwrap_or_else(|| start + Duration::minutes(10));

            // The title follows the speaker label; only leaf elements count
            // as titles (a wrapper with children is not a title).
            let title_el = speaker_el.and_then(next_element);
            let title = title_el
                .filter(|el| child_element_count(*el) == 0)
                .map(text_of)
                .unwrap_or_default();
            let detail_url = title_el
                .filter(|el| el.value().name() == "a")
                .and_then(|el| el.value().attr("href"))
                .map(|href| join_url(base_url, href));

            let organization = title_el
                .and_then(next_element)
                .filter(|el| child_element_count(*el) == 0)
                .map(text_of)
                .filter(|s| !s.is_empty());

            items.push(ScheduleItem {
                track: track.clone(),
                room: room.clone(),
                speaker,
                title,
                organization,
                detail_url,
                start,
                end,
            });
        }
    }
    items
}

/// Extract the description paragraphs from a speaker detail page.
///
/// A single paragraph is emitted as plain text; two or more are each
/// wrapped in a `<p>` block. Line breaks inside a paragraph become `<br/>`.
fn extract_description(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraphs: Vec<String> = document
        .select(&SESSION_INFO)
        .filter(|el| el.value().name() != "h1")
        .map(|el| raw_text(el).replace('\r', "").replace('\n', "<br/>"))
        .collect();

    if paragraphs.len() < 2 {
        paragraphs.concat()
    } else {
        paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", p))
            .collect()
    }
}

/// The fixed event date: BuriKaigi 2024 took place on 2024-01-20.
fn event_date() -> NaiveDate {
    // Unwrap safe: literal date
    NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
}

/// Parse an `HH:MM` wall-clock label as JST on the event date.
fn parse_time(label: &str) -> Option<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(label.trim(), "%H:%M").ok()?;
    let local = event_date().and_time(time);
    Some(
        jst()
            .from_local_datetime(&local)
            .single()?
            .with_timezone(&Utc),
    )
}

/// Fallback for items without any parseable time label.
fn day_start() -> DateTime<Utc> {
    // Unwrap safe: midnight on a fixed date always parses
    parse_time("00:00").unwrap()
}
