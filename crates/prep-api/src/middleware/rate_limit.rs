use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// One login token is replenished every 200ms (5 per second).
pub const AUTH_REPLENISH_MS: u64 = 200;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Constant delay added to login responses.
pub const TIMING_SAFE_DELAY: Duration = Duration::from_millis(50);

/// Per-IP rate limit for credential endpoints.
///
/// The client address comes from `X-Forwarded-For`/`X-Real-IP`/`Forwarded`,
/// falling back to the peer address, so the server must be run with
/// connect info.
pub fn apply_auth_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_millisecond(AUTH_REPLENISH_MS)
        .burst_size(AUTH_BURST_SIZE)
        .use_headers()
        .finish();

    match config {
        Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
        None => {
            tracing::error!("Invalid auth rate limiter configuration, rate limiting disabled");
            router
        }
    }
}

/// Adds a small constant delay to every response from a sensitive endpoint.
pub async fn timing_safe_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    tokio::time::sleep(TIMING_SAFE_DELAY).await;

    response
}

/// Apply timing-safe middleware to a router
pub fn apply_timing_safe<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(timing_safe_middleware))
}
