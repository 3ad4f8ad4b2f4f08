//! Record store for systems.
//!
//! [`SystemStore`] is the capability set the service depends on. The only
//! implementation, [`SeaOrmSystemStore`], runs on a `SeaORM` connection pool; no
//! `SeaORM` type appears in the trait.
//!
//! Every call is bounded by the configured query timeout. Expiry and driver
//! failures both surface as [`Error::Store`].

use crate::core::identifier::SystemId;
use crate::core::mapper;
use crate::core::model::{ContactInput, SystemInput, SystemRecord};
use crate::core::query::SystemQuery;
use crate::entities::{System, system};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default bound on a single store call.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Persistence operations on systems.
#[async_trait]
pub trait SystemStore: Send + Sync {
    /// Inserts a new system, assigning its identifier and timestamps.
    async fn create(&self, input: SystemInput) -> Result<SystemRecord>;

    /// Fetches one system; [`Error::NotFound`] when absent.
    async fn get_by_id(&self, id: SystemId) -> Result<SystemRecord>;

    /// Fetches the newest system with exactly this name; [`Error::NotFound`] when absent.
    async fn get_by_name(&self, name: &str) -> Result<SystemRecord>;

    /// Every system, newest first.
    async fn get_all(&self) -> Result<Vec<SystemRecord>>;

    /// Systems matching `query`, newest first.
    async fn search(&self, query: &SystemQuery) -> Result<Vec<SystemRecord>>;

    /// Replaces every mutable field in one statement; [`Error::NotFound`] when absent.
    async fn update(&self, id: SystemId, input: SystemInput) -> Result<SystemRecord>;

    /// Replaces the contact fields in one statement; [`Error::NotFound`] when absent.
    async fn update_contact(&self, id: SystemId, contact: ContactInput) -> Result<SystemRecord>;

    /// Removes a system permanently; [`Error::NotFound`] when no row was deleted.
    async fn delete(&self, id: SystemId) -> Result<()>;

    /// Number of stored systems.
    async fn count(&self) -> Result<u64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}

/// [`SystemStore`] backed by a `SeaORM` connection pool.
#[derive(Debug)]
pub struct SeaOrmSystemStore {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl SeaOrmSystemStore {
    /// Wraps a connection; each call is bounded by `query_timeout`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, DbErr>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result.map_err(|e| Error::store(format!("{operation} failed"), e)),
            Err(elapsed) => Err(Error::store(
                format!(
                    "{operation} timed out after {} ms",
                    self.query_timeout.as_millis()
                ),
                elapsed,
            )),
        }
    }

    async fn apply_update(
        &self,
        operation: &'static str,
        id: SystemId,
        active: system::ActiveModel,
    ) -> Result<SystemRecord> {
        // UPDATE ... WHERE id = ?; no row matched comes back as RecordNotUpdated.
        // Without RETURNING the row is re-selected, and a delete in between
        // comes back as RecordNotFound.
        let updated = self
            .bounded(operation, async {
                match active.update(&self.db).await {
                    Ok(model) => Ok(Some(model)),
                    Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        updated.map(SystemRecord::from).ok_or_else(|| Error::NotFound {
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl SystemStore for SeaOrmSystemStore {
    #[instrument(skip(self, input), fields(system_name = %input.system_name))]
    async fn create(&self, input: SystemInput) -> Result<SystemRecord> {
        let id = SystemId::generate();
        let active = mapper::to_new_active_model(id, input, chrono::Utc::now());
        let model = self.bounded("insert system", active.insert(&self.db)).await?;
        debug!(%id, "Inserted system row");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: SystemId) -> Result<SystemRecord> {
        self.bounded(
            "select system by id",
            System::find_by_id(id.as_uuid()).one(&self.db),
        )
        .await?
        .map(SystemRecord::from)
        .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<SystemRecord> {
        self.bounded(
            "select system by name",
            System::find()
                .filter(system::Column::SystemName.eq(name))
                .order_by_desc(system::Column::CreatedAt)
                .order_by_desc(system::Column::Id)
                .one(&self.db),
        )
        .await?
        .map(SystemRecord::from)
        .ok_or_else(|| Error::NotFound {
            id: name.to_string(),
        })
    }

    async fn get_all(&self) -> Result<Vec<SystemRecord>> {
        self.search(&SystemQuery::all()).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &SystemQuery) -> Result<Vec<SystemRecord>> {
        let models = self
            .bounded("select systems", query.build().all(&self.db))
            .await?;
        debug!("Fetched {} systems.", models.len());
        Ok(models.into_iter().map(SystemRecord::from).collect())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: SystemId, input: SystemInput) -> Result<SystemRecord> {
        let active = mapper::to_replacement_active_model(id, input, chrono::Utc::now());
        self.apply_update("update system", id, active).await
    }

    #[instrument(skip(self, contact))]
    async fn update_contact(&self, id: SystemId, contact: ContactInput) -> Result<SystemRecord> {
        let active = mapper::to_contact_active_model(id, contact, chrono::Utc::now());
        self.apply_update("update system contact", id, active).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: SystemId) -> Result<()> {
        let result = self
            .bounded(
                "delete system",
                System::delete_by_id(id.as_uuid()).exec(&self.db),
            )
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        self.bounded("count systems", System::find().count(&self.db))
            .await
    }

    async fn ping(&self) -> Result<()> {
        self.bounded("ping", self.db.ping()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_create_assigns_id_and_equal_timestamps() -> Result<()> {
        let store = setup_test_store().await?;

        let created = store.create(SystemInput::new("A", "a@b.com")).await?;

        assert!(!created.id.to_string().is_empty());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.local_government_id, None);
        assert_eq!(created.telephone, None);
        assert_eq!(created.remark, None);

        let fetched = store.get_by_id(created.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_and_empty_optionals_survive_storage() -> Result<()> {
        let store = setup_test_store().await?;

        let created = store
            .create(
                SystemInput::new("Health System", "kenkou-admin@yokohama.lg.jp")
                    .with_telephone("")
                    .with_remark("notes"),
            )
            .await?;
        let fetched = store.get_by_id(created.id).await?;

        assert_eq!(fetched.local_government_id, None);
        assert_eq!(fetched.telephone, Some(String::new()));
        assert_eq!(fetched.remark.as_deref(), Some("notes"));

        // A full replace with the optionals absent must store NULL, not ''
        store
            .update(created.id, SystemInput::new("Health System", "kenkou-admin@yokohama.lg.jp"))
            .await?;
        let raw = System::find_by_id(created.id.as_uuid())
            .one(store.connection())
            .await?
            .unwrap();
        assert_eq!(raw.telephone, None);
        assert_eq!(raw.remark, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_id_is_not_found() -> Result<()> {
        let store = setup_test_store().await?;

        let err = store.get_by_id(SystemId::generate()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_is_empty_without_records() -> Result<()> {
        let store = setup_test_store().await?;
        assert!(store.get_all().await?.is_empty());
        assert_eq!(store.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_orders_newest_first() -> Result<()> {
        let store = setup_test_store().await?;

        let first = store.create(SystemInput::new("First", "first@example.jp")).await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.create(SystemInput::new("Second", "second@example.jp")).await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let third = store.create(SystemInput::new("Third", "third@example.jp")).await?;

        let ids: Vec<SystemId> = store.get_all().await?.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_refreshes_updated_at() -> Result<()> {
        let store = setup_test_store().await?;
        let created = store
            .create(SystemInput::new("Old", "old@example.jp").with_remark("keep?"))
            .await?;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = store
            .update(
                created.id,
                SystemInput::new("New", "new@example.jp").with_local_government_id("141003"),
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.system_name, "New");
        assert_eq!(updated.mail_address, "new@example.jp");
        assert_eq!(updated.local_government_id.as_deref(), Some("141003"));
        assert_eq!(updated.remark, None);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get_by_id(created.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_id_writes_nothing() -> Result<()> {
        let store = setup_test_store().await?;
        let existing = store.create(SystemInput::new("Keep", "keep@example.jp")).await?;

        let err = store
            .update(SystemId::generate(), SystemInput::new("Ghost", "ghost@example.jp"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(store.count().await?, 1);
        assert_eq!(store.get_all().await?, vec![existing]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_contact_leaves_other_fields() -> Result<()> {
        let store = setup_test_store().await?;
        let created = store
            .create(
                SystemInput::new("Disaster Response System", "saigai-admin@osaka.lg.jp")
                    .with_telephone("06-1234-5678")
                    .with_remark("on call"),
            )
            .await?;

        let updated = store
            .update_contact(
                created.id,
                ContactInput {
                    mail_address: "bousai@osaka.lg.jp".to_string(),
                    telephone: None,
                },
            )
            .await?;

        assert_eq!(updated.mail_address, "bousai@osaka.lg.jp");
        assert_eq!(updated.telephone, None);
        assert_eq!(updated.system_name, created.system_name);
        assert_eq!(updated.remark, created.remark);
        assert_eq!(updated.created_at, created.created_at);

        let missing = store
            .update_contact(
                SystemId::generate(),
                ContactInput {
                    mail_address: "x@example.jp".to_string(),
                    telephone: None,
                },
            )
            .await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() -> Result<()> {
        let store = setup_test_store().await?;
        let created = store.create(SystemInput::new("A", "a@b.com")).await?;

        store.delete(created.id).await?;
        assert!(matches!(
            store.delete(created.id).await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            store.get_by_id(created.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_name_is_exact() -> Result<()> {
        let store = setup_test_store().await?;
        let created = store
            .create(SystemInput::new("Library System", "library-admin@chiyoda.tokyo.jp"))
            .await?;

        assert_eq!(store.get_by_name("Library System").await?.id, created.id);
        assert!(matches!(
            store.get_by_name("library system").await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            store.get_by_name("Library").await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_driver_failures_become_store_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = SeaOrmSystemStore::new(db, DEFAULT_QUERY_TIMEOUT);

        let err = store.get_all().await.unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
        assert!(!err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_slow_call_times_out_as_store_error() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SeaOrmSystemStore::new(db, Duration::from_millis(10));

        let err = store
            .bounded("slow select", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, DbErr>(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Store { .. }));
        assert!(err.to_string().contains("timed out"), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_of_row_deleted_before_reselect_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([Vec::<system::Model>::new()])
            .into_connection();
        let store = SeaOrmSystemStore::new(db, DEFAULT_QUERY_TIMEOUT);

        let err = store
            .update(SystemId::generate(), SystemInput::new("Gone", "gone@example.jp"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
