use actix_web::{web, HttpServer};
use anyhow::Context;
use sf_api::{create_app, AppState, Repositories};
use sf_infra::DatabasePool;
use sf_shared::AppConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    info!(environment = ?config.environment, "Starting storefront API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is the built-in default; set a real secret");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;
    info!(stats = %pool.get_statistics(), "Database ready");

    let state = web::Data::new(AppState::new(Repositories::mysql(&pool), &config.auth.jwt));
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
