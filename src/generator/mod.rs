//! Generator module
//!
//! This module holds the file-patching core: the migration patch engine,
//! the model regeneration engine, and the collaborators they talk through
//! (file store, artisan runner).

pub mod artisan;
pub mod files;
pub mod migration;
pub mod model;

// Re-exports
pub use artisan::{ArtisanRunner, ShellRunner};
pub use files::{DiskStore, FileStore};
pub use migration::{FieldLine, MigrationPatcher};
pub use model::ModelBuilder;
