//! Conversions between the `system` entity and the external record shapes.
//!
//! Pure functions only; nothing here talks to the database.

use crate::core::identifier::SystemId;
use crate::core::model::{ContactInput, SystemInput, SystemRecord};
use crate::core::optional;
use crate::entities::system;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

impl From<system::Model> for SystemRecord {
    fn from(model: system::Model) -> Self {
        Self {
            id: SystemId::from(model.id),
            system_name: model.system_name,
            local_government_id: optional::from_storage(model.local_government_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
            mail_address: model.mail_address,
            telephone: optional::from_storage(model.telephone),
            remark: optional::from_storage(model.remark),
        }
    }
}

/// Insert parameters for a new system; both timestamps are `now`.
#[must_use]
pub fn to_new_active_model(
    id: SystemId,
    input: SystemInput,
    now: DateTime<Utc>,
) -> system::ActiveModel {
    system::ActiveModel {
        id: Set(id.as_uuid()),
        created_at: Set(now),
        ..to_replacement_active_model(id, input, now)
    }
}

/// Full-replace parameters for an existing system.
///
/// Every mutable column is written; `created_at` is left untouched.
#[must_use]
pub fn to_replacement_active_model(
    id: SystemId,
    input: SystemInput,
    now: DateTime<Utc>,
) -> system::ActiveModel {
    system::ActiveModel {
        id: Unchanged(id.as_uuid()),
        system_name_folded: Set(fold_name(&input.system_name)),
        system_name: Set(input.system_name),
        local_government_id: optional::to_storage(input.local_government_id),
        mail_address: Set(input.mail_address),
        telephone: optional::to_storage(input.telephone),
        remark: optional::to_storage(input.remark),
        created_at: NotSet,
        updated_at: Set(now),
    }
}

/// Case-folded form of a system name, as stored for name search.
#[must_use]
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Contact-only update parameters.
#[must_use]
pub fn to_contact_active_model(
    id: SystemId,
    contact: ContactInput,
    now: DateTime<Utc>,
) -> system::ActiveModel {
    system::ActiveModel {
        id: Unchanged(id.as_uuid()),
        mail_address: Set(contact.mail_address),
        telephone: optional::to_storage(contact.telephone),
        updated_at: Set(now),
        ..Default::default()
    }
}
