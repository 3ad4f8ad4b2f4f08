//! Database connection and table creation using `SeaORM`.
//!
//! The `system` table and its indexes are generated from the entity definition with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust model.
//! Statements use `IF NOT EXISTS` and are safe to run on every start-up.

use crate::config::app::DatabaseConfig;
use crate::entities::System;
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Opens a connection pool configured from `config`.
///
/// # Errors
/// Returns a store error if the database cannot be reached.
#[instrument(skip(config))]
pub async fn create_connection(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(false);

    debug!("Connecting to database.");
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Database connection established.");
    Ok(db)
}

/// Creates the `system` table and its indexes when missing.
///
/// # Errors
/// Returns a store error if a statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut system_table = schema.create_table_from_entity(System);
    system_table.if_not_exists();
    db.execute(builder.build(&system_table)).await?;

    for mut index in schema.create_index_from_entity(System) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!("Ensured system table and indexes exist.");
    Ok(())
}
