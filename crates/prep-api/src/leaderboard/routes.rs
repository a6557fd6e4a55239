use axum::{Json, Router, extract::State, routing::get};
use prep_db::repositories::leaderboard as leaderboard_repo;

use super::model::{LeaderboardEntry, LeaderboardQuery, LeaderboardResponse};
use crate::{ApiState, auth::AuthUser, error::ApiError, extract::ValidQuery};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

async fn leaderboard(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ValidQuery(query): ValidQuery<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let entries = leaderboard_repo::list_entries(&state.pool, query.limit())
        .await?
        .into_iter()
        .map(LeaderboardEntry::from)
        .collect();
    let stats = leaderboard_repo::stats(&state.pool).await?.into();

    Ok(Json(LeaderboardResponse { stats, entries }))
}
