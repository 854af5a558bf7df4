//! End-to-end extraction tests for the fortee-style timetable grid,
//! running the full pipeline against fixture HTML.

mod common;

use chrono::{Duration, TimeZone, Utc};

use burikaigi_core::{ics, AgendaSource, Session, Timetable};
use common::FixtureSource;

const TIMETABLE_HTML: &str = include_str!("fixtures/timetable.html");
const PROPOSAL_AAA_HTML: &str = include_str!("fixtures/proposal_aaa.html");
const PROPOSAL_BBB_HTML: &str = include_str!("fixtures/proposal_bbb.html");

fn fixture_source() -> FixtureSource {
    FixtureSource::new(vec![
        ("https://fortee.jp/burikaigi-2025/proposal/aaa", PROPOSAL_AAA_HTML),
        ("https://fortee.jp/burikaigi-2025/proposal/bbb", PROPOSAL_BBB_HTML),
        ("https://fortee.jp/burikaigi-2025/timetable", TIMETABLE_HTML),
    ])
}

async fn scrape() -> Vec<Session> {
    Timetable::new()
        .sessions(&fixture_source())
        .await
        .expect("fixture scrape should succeed")
}

#[tokio::test]
async fn grid_yields_sessions_in_column_order() {
    let sessions = scrape().await;
    let titles: Vec<&str> = sessions.iter().map(|s| s.title.as_str()).collect();
    // The unlabelled time-slot in the second column is skipped; the second
    // proposal has no title and falls back to its speaker.
    assert_eq!(titles, vec!["タイトル X", "休憩", "スピーカー Y"]);
}

#[tokio::test]
async fn time_slot_position_maps_to_minutes() {
    let sessions = scrape().await;
    let slot = &sessions[1];

    // top: 60px at 30 px per 15 min = grid start + 30 min
    assert_eq!(slot.start, Utc.with_ymd_and_hms(2025, 2, 1, 1, 30, 0).unwrap());
    assert_eq!(slot.end - slot.start, Duration::minutes(15));
    assert_eq!(slot.speaker, "");
    assert_eq!(slot.description, "");
    assert_eq!(slot.location, "Room A");
}

#[tokio::test]
async fn proposal_pages_fill_in_session_metadata() {
    let sessions = scrape().await;

    let first = &sessions[0];
    assert_eq!(first.speaker, "スピーカー X");
    assert_eq!(first.location, "Room A");
    assert_eq!(first.start, Utc.with_ymd_and_hms(2025, 2, 1, 1, 0, 0).unwrap());
    assert_eq!(first.end - first.start, Duration::minutes(30));
    assert_eq!(first.description, "一段落目。\n\n二段落目。");

    let second = &sessions[2];
    assert_eq!(second.speaker, "スピーカー Y");
    assert_eq!(second.location, "Room B");
    assert_eq!(second.end - second.start, Duration::minutes(45));
    assert_eq!(second.description, "一行だけの説明。");
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
async fn calendar_output_is_utc_on_the_event_date() {
    let source = Timetable::new();
    let sessions = scrape().await;
    let ical = ics::to_ical(
        source.calendar_name(),
        source.calendar_description(),
        &sessions,
    );

    assert!(ical.contains("X-WR-CALNAME:BuriKaigi 2025"));
    assert!(ical.contains("DTSTART:20250201T013000Z"));
    for line in ical.lines().filter(|l| l.starts_with("DTSTART")) {
        assert!(
            line.starts_with("DTSTART:20250201T") && line.ends_with('Z'),
            "unexpected DTSTART line: {}",
            line
        );
    }
}
