use dotenvy::dotenv;
use std::sync::Arc;
use system_registry::api::{self, AppState};
use system_registry::config::{self, database};
use system_registry::core::{SeaOrmSystemStore, SystemService, seed};
use system_registry::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file (before configuration so it can override settings)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Load the main application configuration
    let app_config = config::load_app_configuration()?;

    // 3. Initialize tracing, RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.logging.level)),
        )
        .init();
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&app_config.database)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Wire the store and service
    let store = SeaOrmSystemStore::new(db, app_config.database.query_timeout());
    let service = SystemService::new(Arc::new(store));

    // 6. Seed demonstration systems (if enabled)
    if app_config.seed.enabled {
        seed::seed_systems(&service)
            .await
            .inspect_err(|e| error!("Failed to seed systems: {}", e))?;
    }

    // 7. Serve HTTP until shutdown
    let router = api::router(AppState::new(service));
    api::serve(&app_config.server, router).await
}
