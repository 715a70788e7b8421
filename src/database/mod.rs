//! Database module
//!
//! Connection handling and the schema catalog the session uses to offer
//! existing tables as selectable models.

pub mod catalog;
pub mod connection;

// Re-exports
pub use catalog::{SchemaCatalog, SqlCatalog};
pub use connection::{DatabaseBackend, DatabasePool};
