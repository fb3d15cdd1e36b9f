//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{MemoryReportStore, PgReportStore},
    config::Config,
    error::ApiError,
    web::{router, state::AppState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use subscription_core::ports::ReportStore;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Choose the Report Store ---
    let reports: Arc<dyn ReportStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;
            let store = PgReportStore::new(db_pool);
            info!("Running database migrations...");
            store.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL is not set; reports are kept in memory and lost on restart");
            Arc::new(MemoryReportStore::new())
        }
    };

    // --- 3. Build the Shared AppState and Router ---
    let app_state = Arc::new(AppState {
        reports,
        config: config.clone(),
    });
    let app = router(app_state);

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
