use axum::{Json, Router, extract::State, routing::get};
use prep_db::repositories::feed as feed_repo;

use super::model::FeedPost;
use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/feed", get(feed))
}

/// Posts newest first.
async fn feed(_auth_user: AuthUser, State(state): State<ApiState>) -> Result<Json<Vec<FeedPost>>, ApiError> {
    let posts = feed_repo::list_posts(&state.pool)
        .await?
        .into_iter()
        .map(FeedPost::from)
        .collect();

    Ok(Json(posts))
}
