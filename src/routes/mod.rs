pub mod agenda;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Adapter from `anyhow` errors to an HTTP response.
///
/// Every handler failure here is a failed scrape: an `AgendaError` from a
/// fetch against the agenda site, bubbled up unmodified. A scrape either
/// yields a complete session list or nothing, so all failures surface the
/// same way, as a JSON `{"error": …}` body with status 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Body {
            error: String,
        }

        let body = Json(Body {
            error: self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
