//! End-to-end extraction tests for the burikaigi.dev schedule page,
//! running the full pipeline against fixture HTML.

mod common;

use chrono::Duration;

use burikaigi_core::{ics, AgendaSource, SchedulePage};
use common::FixtureSource;

const SCHEDULE_HTML: &str = include_str!("fixtures/schedule.html");
const SPEAKER_HTML: &str = include_str!("fixtures/speaker.html");

fn fixture_source() -> FixtureSource {
    // More specific route first: detail pages, then the index
    FixtureSource::new(vec![
        ("https://burikaigi.dev/speakers/", SPEAKER_HTML),
        ("https://burikaigi.dev", SCHEDULE_HTML),
    ])
}

async fn scrape() -> Vec<burikaigi_core::Session> {
    SchedulePage::new()
        .sessions(&fixture_source())
        .await
        .expect("fixture scrape should succeed")
}

#[tokio::test]
async fn breaks_are_never_emitted() {
    let sessions = scrape().await;
    assert!(sessions.iter().all(|s| s.title != "休憩"));
    assert!(sessions.iter().all(|s| s.speaker != "休憩"));
    // The fixture has 7 items, 2 of which are breaks
    assert_eq!(sessions.len(), 5);
}

#[tokio::test]
async fn sessions_match_the_fixture_agenda() {
    let fmt = |s: &burikaigi_core::Session| {
        // Render in JST for readability, like the source page
        let jst = |t: chrono::DateTime<chrono::Utc>| {
            (t + Duration::hours(9)).format("%m/%d %H:%M").to_string()
        };
        format!(
            "{} - {}, {}, {}, {}, {}",
            jst(s.start),
            jst(s.end),
            s.location,
            s.title,
            s.speaker,
            s.description
        )
    };

    let sessions = scrape().await;
    let rendered: Vec<String> = sessions.iter().map(fmt).collect();
    assert_eq!(
        rendered,
        vec![
            "01/20 11:00 - 01/20 11:10, 共通 (DXセンター1F), 受付開始, , ",
            "01/20 11:50 - 01/20 12:00, 共通 (DXセンター1F), オープニング, , ",
            "01/20 12:00 - 01/20 12:15, 共通 (DXセンター1F), タイトル A, スピーカー A (所属 A), <p>説明 A</p><p>説明 B</p>",
            "01/20 12:30 - 01/20 13:30, Room-Buri (中央棟2F 教室), タイトル B, スピーカー B, <p>説明 A</p><p>説明 B</p>",
            "01/20 13:40 - 01/20 13:50, Room-Buri (中央棟2F 教室), タイトル C, スピーカー C, ",
        ]
    );
}

#[tokio::test]
async fn invariants_hold_for_every_session() {
    let sessions = scrape().await;
    for session in &sessions {
        assert!(session.end >= session.start, "{}", session.title);
        assert!(!session.title.is_empty());
    }
}

#[tokio::test]
async fn dtstart_lines_stay_on_the_event_date_in_utc() {
    let source = SchedulePage::new();
    let sessions = scrape().await;
    let ical = ics::to_ical(
        source.calendar_name(),
        source.calendar_description(),
        &sessions,
    );

    let mut seen = 0;
    for line in ical.lines().filter(|l| l.starts_with("DTSTART")) {
        seen += 1;
        let value = line.strip_prefix("DTSTART:20240120T").unwrap_or_else(|| {
            panic!("unexpected DTSTART line: {}", line);
        });
        assert_eq!(value.len(), 7, "unexpected DTSTART line: {}", line);
        assert!(value.ends_with('Z'), "unexpected DTSTART line: {}", line);
        assert!(value[..6].chars().all(|c| c.is_ascii_digit()));
    }
    assert_eq!(seen, sessions.len());
}

#[tokio::test]
async fn identical_input_yields_byte_identical_output() {
    let first = ics::to_ical("BuriKaigi", "desc", &scrape().await);
    let second = ics::to_ical("BuriKaigi", "desc", &scrape().await);
    assert_eq!(first, second);
}
