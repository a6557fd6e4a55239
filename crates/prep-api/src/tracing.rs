//! Tracing and logging setup.
//!
//! Development gets pretty, human-readable output. Production emits
//! flattened JSON events suitable for log aggregation.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Initialize tracing/logging based on the environment
///
/// `RUST_LOG` wins when set (e.g. `RUST_LOG=debug,tower_http=trace`);
/// otherwise `log_level` is used for the application and `tower_http`,
/// with `sqlx` held at `warn`.
pub fn init_tracing(env: Environment, log_level: &str) {
    let env_filter = build_filter(log_level);

    if env.is_development() {
        init_development_tracing(env_filter);
    } else {
        init_production_tracing(env_filter);
    }
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)))
}

fn default_directives(log_level: &str) -> String {
    let level = match log_level.trim() {
        "" => "info",
        level => level,
    };
    format!("{level},tower_http={level},sqlx=warn")
}

fn init_development_tracing(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

fn init_production_tracing(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("debug"), "debug,tower_http=debug,sqlx=warn");
        assert_eq!(default_directives(""), "info,tower_http=info,sqlx=warn");
    }
}
