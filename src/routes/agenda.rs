//! Agenda feed endpoints.
//!
//! One calendar feed and one JSON session list per conference edition.
//! Every request runs a full scrape against the source site; there is no
//! caching and a failed fetch fails the request.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use burikaigi_core::{ics, AgendaSource, HttpPageSource, SchedulePage, Session, Timetable};

use crate::routes::AppError;

pub fn router() -> Router {
    Router::new()
        .route("/2024/calendar.ics", get(calendar_2024))
        .route("/2024/sessions", get(sessions_2024))
        .route("/2025/calendar.ics", get(calendar_2025))
        .route("/2025/sessions", get(sessions_2025))
}

/// GET /2024/calendar.ics - BuriKaigi 2024 as an iCalendar feed
async fn calendar_2024() -> Result<Response, AppError> {
    calendar_feed(&SchedulePage::new()).await
}

/// GET /2024/sessions - BuriKaigi 2024 normalized sessions as JSON
async fn sessions_2024() -> Result<Json<Vec<Session>>, AppError> {
    session_list(&SchedulePage::new()).await
}

/// GET /2025/calendar.ics - BuriKaigi 2025 as an iCalendar feed
async fn calendar_2025() -> Result<Response, AppError> {
    calendar_feed(&Timetable::new()).await
}

/// GET /2025/sessions - BuriKaigi 2025 normalized sessions as JSON
async fn sessions_2025() -> Result<Json<Vec<Session>>, AppError> {
    session_list(&Timetable::new()).await
}

async fn calendar_feed(source: &impl AgendaSource) -> Result<Response, AppError> {
    let pages = HttpPageSource::new();
    let sessions = source.sessions(&pages).await?;
    let ical = ics::to_ical(
        source.calendar_name(),
        source.calendar_description(),
        &sessions,
    );

    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        ical,
    )
        .into_response())
}

async fn session_list(source: &impl AgendaSource) -> Result<Json<Vec<Session>>, AppError> {
    let pages = HttpPageSource::new();
    Ok(Json(source.sessions(&pages).await?))
}
