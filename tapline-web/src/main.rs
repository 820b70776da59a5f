//! tapline-web - rhythm game web backend
//!
//! Serves the game client, the song list, score storage/ranking, and the
//! minimal account layer. Beatmaps are read from the same directory the
//! offline generator writes into.

use anyhow::Result;
use tapline_common::config::TaplineConfig;
use tapline_web::{build_router, db, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tapline-web v{}", env!("CARGO_PKG_VERSION"));

    let config = TaplineConfig::load()?;
    info!("Beatmaps directory: {}", config.beatmaps_dir.display());
    info!("Database: {}", config.database_path.display());

    let pool = db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    let state = AppState::new(pool, config.beatmaps_dir.clone());
    let app = build_router(state, config.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("tapline-web listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
