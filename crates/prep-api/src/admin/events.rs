use axum::{Json, Router, extract::State, routing::get};
use prep_console::analytics::UpcomingEvents;

use super::{model::ExamQuery, parse_exam};
use crate::{ApiState, auth::AdminSession, error::ApiError, extract::ValidQuery};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/admin/events/upcoming", get(upcoming_events))
}

async fn upcoming_events(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<ExamQuery>,
) -> Result<Json<UpcomingEvents>, ApiError> {
    let exam = parse_exam(query.exam.as_deref())?;
    Ok(Json(state.analytics.upcoming_events(exam)))
}
