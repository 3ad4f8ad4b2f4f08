//! Entity module - SeaORM entity definitions for the database.

pub mod system;

pub use system::Entity as System;
