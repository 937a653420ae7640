use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fotografiku::config::AppConfig;
use fotografiku::db;
use fotografiku::routes;
use fotografiku::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let conn = db::init_db(&config.database_url)?;
    tracing::info!("using database at {}", config.database_url);

    let port = config.port;
    let state = Arc::new(AppState::new(conn, config));
    let app = routes::create_router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
