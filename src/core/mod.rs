//! Core data-access layer for systems.
//!
//! Leaves first: identifier and optional-field codecs, the record mapper, the query
//! builder, the record store, and the service that ties them together.

/// Parsing and display of system identifiers
pub mod identifier;
/// Entity/record conversions
pub mod mapper;
/// External record and input shapes
pub mod model;
/// Optional text field semantics
pub mod optional;
/// Search criteria and query construction
pub mod query;
/// Demonstration data
pub mod seed;
/// Validation and orchestration
pub mod service;
/// Store trait and its `SeaORM` implementation
pub mod store;
/// Write-input validation
pub mod validation;

pub use identifier::SystemId;
pub use model::{ContactInput, SystemInput, SystemRecord};
pub use query::{SearchCriteria, SystemQuery};
pub use service::SystemService;
pub use store::{SeaOrmSystemStore, SystemStore};
