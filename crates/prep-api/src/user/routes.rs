use axum::{Json, Router, extract::State, routing::get};
use prep_db::repositories::{catalog, user as user_repo};
use uuid::Uuid;

use super::model::{
    ExamProfileView, MeResponse, SubjectView, SubjectsQuery, TopicView, TopicsQuery,
};
use crate::{
    ApiState,
    admin::parse_exam,
    auth::{AuthUser, models::UserView},
    error::ApiError,
    extract::ValidQuery,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/me", get(me))
        .route("/subjects", get(list_subjects))
        .route("/topics", get(list_topics))
}

/// The learner and their profile for their primary exam.
async fn me(auth_user: AuthUser, State(state): State<ApiState>) -> Result<Json<MeResponse>, ApiError> {
    let record = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;
    let user = UserView::try_from(record)?;

    let exam_profile =
        match user_repo::find_exam_profile(&state.pool, user.id, user.primary_exam.as_str()).await? {
            Some(record) => ExamProfileView::from_record(user.primary_exam, &record),
            None => ExamProfileView::empty(user.primary_exam),
        };

    Ok(Json(MeResponse { user, exam_profile }))
}

async fn list_subjects(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<SubjectsQuery>,
) -> Result<Json<Vec<SubjectView>>, ApiError> {
    let exam = parse_exam(query.exam.as_deref())?;

    let subjects = catalog::list_subjects(&state.pool, exam.map(|e| e.as_str()))
        .await?
        .into_iter()
        .map(SubjectView::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(subjects))
}

async fn list_topics(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<TopicsQuery>,
) -> Result<Json<Vec<TopicView>>, ApiError> {
    let subject_id = query
        .subject_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("subjectId is required".to_string()))?;
    let subject_id = Uuid::parse_str(subject_id)
        .map_err(|_| ApiError::Validation("invalid subjectId".to_string()))?;

    let topics = catalog::list_topics(&state.pool, subject_id)
        .await?
        .into_iter()
        .map(TopicView::from)
        .collect();

    Ok(Json(topics))
}
