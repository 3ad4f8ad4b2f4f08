//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and creating systems with
//! sensible defaults.

use crate::core::store::DEFAULT_QUERY_TIMEOUT;
use crate::core::{SeaOrmSystemStore, SystemInput, SystemRecord, SystemService};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database-backed tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A store over a fresh in-memory database.
pub async fn setup_test_store() -> Result<SeaOrmSystemStore> {
    let db = setup_test_db().await?;
    Ok(SeaOrmSystemStore::new(db, DEFAULT_QUERY_TIMEOUT))
}

/// A service over a fresh in-memory database.
pub async fn setup_test_service() -> Result<SystemService> {
    let store = setup_test_store().await?;
    Ok(SystemService::new(Arc::new(store)))
}

/// Creates a system with sensible defaults.
///
/// # Defaults
/// * `mail_address`: derived from `name` (`"Tax System"` becomes `taxsystem@example.jp`)
/// * optional fields: absent
pub async fn create_test_system(service: &SystemService, name: &str) -> Result<SystemRecord> {
    service
        .create_system(SystemInput::new(name, test_mail_address(name)))
        .await
}

fn test_mail_address(name: &str) -> String {
    let local: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if local.is_empty() {
        "system@example.jp".to_string()
    } else {
        format!("{local}@example.jp")
    }
}
