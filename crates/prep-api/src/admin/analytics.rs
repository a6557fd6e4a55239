use axum::{Json, Router, extract::State, routing::get};
use prep_console::analytics::{DEFAULT_WEAK_TOPIC_LIMIT, SubjectAccuracy, TimeSeries, WeakTopics};

use super::{
    model::{ExamQuery, TimeSeriesQuery, WeakTopicsQuery},
    parse_exam,
};
use crate::{ApiState, auth::AdminSession, error::ApiError, extract::ValidQuery};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/analytics/time-series", get(time_series))
        .route("/admin/analytics/subject-accuracy", get(subject_accuracy))
        .route("/admin/analytics/weak-topics", get(weak_topics))
}

async fn time_series(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<TimeSeriesQuery>,
) -> Result<Json<TimeSeries>, ApiError> {
    let metric = query
        .metric
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::Validation("metric is required".to_string()))?;
    let exam = parse_exam(query.exam.as_deref())?;

    let series = state
        .analytics
        .time_series(metric, exam, query.range.as_deref().unwrap_or_default())?;

    Ok(Json(series))
}

async fn subject_accuracy(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<ExamQuery>,
) -> Result<Json<SubjectAccuracy>, ApiError> {
    let exam = parse_exam(query.exam.as_deref())?;
    Ok(Json(state.analytics.subject_accuracy(exam)))
}

async fn weak_topics(
    _session: AdminSession,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<WeakTopicsQuery>,
) -> Result<Json<WeakTopics>, ApiError> {
    let exam = parse_exam(query.exam.as_deref())?;
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_WEAK_TOPIC_LIMIT);

    Ok(Json(state.analytics.weak_topics(exam, limit)))
}
