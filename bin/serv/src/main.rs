use std::net::SocketAddr;

use anyhow::Context;
use prep_api::{config::ApiConfig, metrics::init_metrics, router, state::ApiState, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(config.env, &config.log_level);

    let pool = prep_db::create_pool(&config.pg_url, config.pg_pool_max)
        .await
        .context("failed to connect to Postgres")?;
    prep_db::ensure_db_and_migrate(&config.pg_url, &pool).await?;

    let state = ApiState::new(&config, pool).context("invalid admin bootstrap settings")?;

    let metrics = if config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let app = router::app(state, &config.parsed_allowed_origins(), metrics);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        app = %config.app_name,
        version = %config.app_version,
        env = ?config.env,
        "Server listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
