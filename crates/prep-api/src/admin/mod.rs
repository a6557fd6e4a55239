//! Admin console routes. Every handler requires an [`AdminSession`](crate::auth::AdminSession).

pub mod analytics;
pub mod events;
pub mod model;
pub mod referrals;
pub mod users;

use axum::Router;
use prep_console::model::ExamCategory;

use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(users::routes())
        .merge(analytics::routes())
        .merge(events::routes())
        .merge(referrals::routes())
}

/// Optional `exam` query value; blank means "not given".
pub(crate) fn parse_exam(raw: Option<&str>) -> Result<Option<ExamCategory>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ApiError::Validation("invalid exam".to_string())),
    }
}
