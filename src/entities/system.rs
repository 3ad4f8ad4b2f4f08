//! System entity - A software system registered by a local government body.
//!
//! Optional text columns are nullable: `None` is stored as NULL and an empty string is
//! stored as `''`, so the two never collapse into each other.
//!
//! `system_name_folded` is written alongside `system_name` so case-insensitive search
//! does not depend on the backend's `LOWER`, which folds ASCII only on SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system")]
pub struct Model {
    /// Unique identifier, generated by the store on insert
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name of the system
    pub system_name: String,
    /// `system_name` lower-cased with full Unicode case mapping, matched by name search
    pub system_name_folded: String,
    /// External local-government identifier, NULL when not associated
    #[sea_orm(nullable, indexed)]
    pub local_government_id: Option<String>,
    /// Contact email address
    #[sea_orm(indexed)]
    pub mail_address: String,
    /// Contact phone number
    #[sea_orm(nullable)]
    pub telephone: Option<String>,
    /// Free-text note
    #[sea_orm(nullable)]
    pub remark: Option<String>,
    /// When the system was registered
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    /// When the system was last modified
    pub updated_at: DateTimeUtc,
}

/// System has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
