//! System service - validation and orchestration over a [`SystemStore`].
//!
//! Identifier-bearing operations parse the identifier first and return
//! [`Error::InvalidIdentifier`] without touching the store. Writes are validated
//! before they are delegated. Everything returned to callers is one of the
//! error kinds defined in [`crate::errors`].

use crate::core::identifier::SystemId;
use crate::core::model::{ContactInput, SystemInput, SystemRecord};
use crate::core::query::{SearchCriteria, SystemQuery};
use crate::core::store::SystemStore;
use crate::core::validation;
use crate::errors::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Stateless entry point for system operations; cheap to clone and share.
#[derive(Clone)]
pub struct SystemService {
    store: Arc<dyn SystemStore>,
}

impl SystemService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SystemStore>) -> Self {
        Self { store }
    }

    /// Lists every system, newest first.
    #[instrument(skip(self))]
    pub async fn get_systems(&self) -> Result<Vec<SystemRecord>> {
        let systems = self.store.get_all().await?;
        debug!(count = systems.len(), "Retrieved systems");
        Ok(systems)
    }

    /// Searches with the supplied criteria; no criteria behaves like [`Self::get_systems`].
    #[instrument(skip(self))]
    pub async fn search_systems(&self, criteria: &SearchCriteria) -> Result<Vec<SystemRecord>> {
        let query = SystemQuery::from(criteria);
        if query.is_unconstrained() {
            return self.get_systems().await;
        }
        let systems = self.store.search(&query).await?;
        debug!(count = systems.len(), "Searched systems");
        Ok(systems)
    }

    /// Fetches one system by its identifier text.
    #[instrument(skip(self))]
    pub async fn get_system_by_id(&self, id: &str) -> Result<SystemRecord> {
        let id = parse_id(id)?;
        self.store.get_by_id(id).await
    }

    /// Fetches a system by its exact name.
    #[instrument(skip(self))]
    pub async fn get_system_by_name(&self, name: &str) -> Result<SystemRecord> {
        validation::validate_system_name(name)?;
        self.store.get_by_name(name).await
    }

    /// Registers a new system.
    #[instrument(skip(self, input), fields(system_name = %input.system_name))]
    pub async fn create_system(&self, input: SystemInput) -> Result<SystemRecord> {
        validation::validate_system_input(&input)
            .inspect_err(|e| warn!("Rejected create: {e}"))?;
        let system = self.store.create(input).await?;
        info!(id = %system.id, "Created system");
        Ok(system)
    }

    /// Replaces every mutable field of an existing system.
    #[instrument(skip(self, input))]
    pub async fn update_system(&self, id: &str, input: SystemInput) -> Result<SystemRecord> {
        let id = parse_id(id)?;
        validation::validate_system_input(&input)
            .inspect_err(|e| warn!("Rejected update: {e}"))?;
        let system = self.store.update(id, input).await?;
        info!(%id, "Updated system");
        Ok(system)
    }

    /// Replaces only the contact fields of an existing system.
    #[instrument(skip(self, contact))]
    pub async fn update_system_contact(
        &self,
        id: &str,
        contact: ContactInput,
    ) -> Result<SystemRecord> {
        let id = parse_id(id)?;
        validation::validate_contact_input(&contact)?;
        let system = self.store.update_contact(id, contact).await?;
        info!(%id, "Updated system contact");
        Ok(system)
    }

    /// Deletes a system permanently.
    #[instrument(skip(self))]
    pub async fn delete_system(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.store.delete(id).await?;
        info!(%id, "Deleted system");
        Ok(())
    }

    /// Number of registered systems.
    pub async fn count_systems(&self) -> Result<u64> {
        self.store.count().await
    }

    /// Whether the store currently answers.
    pub async fn is_store_reachable(&self) -> bool {
        self.store
            .ping()
            .await
            .inspect_err(|e| warn!("Store ping failed: {e}"))
            .is_ok()
    }
}

fn parse_id(id: &str) -> Result<SystemId> {
    SystemId::parse(id).inspect_err(|_| warn!(id, "Invalid system ID format"))
}
