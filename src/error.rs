//! Error types for Model-Forge
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Result type alias for Model-Forge
pub type Result<T> = std::result::Result<T, ModelForgeError>;

/// Main error type for Model-Forge
#[derive(Error, Debug)]
pub enum ModelForgeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model-dependent action was requested before any model was chosen
    #[error("No model selected - add or select a model first")]
    NoModelSelected,

    /// The migration file is still absent after attempting to scaffold one
    #[error("Migration file not found for table '{0}'")]
    MigrationNotFound(String),

    /// The migration file has no create-table closing line to insert before
    #[error("No insertion point in migration '{0}': missing '}});' line")]
    InsertionPointNotFound(String),

    /// The model skeleton has no class declaration to anchor the doc block
    #[error("No class declaration found in model file '{0}'")]
    ClassDeclarationNotFound(String),

    /// The model skeleton has no closing brace to anchor the fillable list
    #[error("No class closing brace found in model file '{0}'")]
    ClassClosingNotFound(String),

    /// An external scaffold command could not be invoked
    #[error("Scaffold command failed: {0}")]
    Scaffold(String),

    /// The configured database URL is not recognized
    #[error("Unsupported database URL: {0}")]
    InvalidDatabaseUrl(String),
}
