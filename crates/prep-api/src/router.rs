use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    admin, auth, feed, leaderboard,
    metrics::{metrics_handler, track_metrics},
    middleware::{cors::create_cors_layer, request_id::request_id_middleware, security_headers},
    state::ApiState,
    user,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .merge(user::routes())
        .merge(auth::routes())
        .merge(leaderboard::routes())
        .merge(feed::routes())
        .merge(admin::routes())
        .fallback(handler_404)
}

/// The full application: routes, state and the middleware stack.
///
/// `/metrics` and request metrics are only wired when a recorder handle is given.
pub fn app(state: ApiState, allowed_origins: &[String], metrics: Option<PrometheusHandle>) -> Router {
    let environment = state.environment;

    let mut app = security_headers::apply_security_headers(router(), environment)
        .layer(create_cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(handle) = metrics {
        let metrics_routes = Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(handle);

        app = app
            .merge(metrics_routes)
            .layer(axum_middleware::from_fn(track_metrics));
    }

    app.layer(axum_middleware::from_fn(request_id_middleware))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn ready(State(state): State<ApiState>) -> StatusCode {
    match prep_db::ping(&state.pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
