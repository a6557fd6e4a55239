use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use prep_console::model::AdminProfile;

use super::{
    middleware::AdminSession,
    models::{AdminLoginRequest, AuthResponse, TelegramAuthRequest},
    service,
};
use crate::{ApiState, error::ApiError, extract::ValidatedJson, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    let login_routes = Router::new().route("/auth/admin/login", post(admin_login));
    let login_routes = rate_limit::apply_auth_rate_limit(rate_limit::apply_timing_safe(login_routes));

    Router::new()
        .route("/auth/telegram", post(telegram_auth))
        .route("/auth/admin/me", get(admin_me))
        .merge(login_routes)
}

async fn telegram_auth(
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<TelegramAuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = service::telegram_auth(&state.pool, &state.auth.user_jwt, req).await?;
    Ok(Json(response))
}

async fn admin_login(
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = service::admin_login(&state.admin, &state.auth.admin_jwt, &req)?;
    Ok(Json(response))
}

async fn admin_me(_session: AdminSession, State(state): State<ApiState>) -> Json<AdminProfile> {
    Json(state.admin.profile.clone())
}
