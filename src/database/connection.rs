//! Database connection abstraction
//!
//! This module provides the database backend enum and connection pooling
//! logic to support multiple database types (PostgreSQL, MySQL, SQLite).

use crate::error::{ModelForgeError, Result};
use sqlx::{mysql::MySqlPool, postgres::PgPool, sqlite::SqlitePool};

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// PostgreSQL
    PostgreSQL,
    /// MySQL/MariaDB
    MySQL,
    /// SQLite
    SQLite,
}

impl DatabaseBackend {
    /// Parse database URL to determine backend
    pub fn from_url(url: &str) -> Result<Self> {
        let url_lower = url.to_lowercase();

        if url_lower.starts_with("postgres://") || url_lower.starts_with("postgresql://") {
            Ok(DatabaseBackend::PostgreSQL)
        } else if url_lower.starts_with("mysql://") || url_lower.starts_with("mariadb://") {
            Ok(DatabaseBackend::MySQL)
        } else if url_lower.starts_with("sqlite://")
            || url_lower.starts_with("sqlite:")
            || url_lower.ends_with(".db")
            || url_lower.ends_with(".sqlite")
            || url_lower.ends_with(".sqlite3")
        {
            Ok(DatabaseBackend::SQLite)
        } else {
            Err(ModelForgeError::InvalidDatabaseUrl(url.to_string()))
        }
    }

    /// Get the name of this database backend
    pub fn name(&self) -> &str {
        match self {
            DatabaseBackend::PostgreSQL => "PostgreSQL",
            DatabaseBackend::MySQL => "MySQL",
            DatabaseBackend::SQLite => "SQLite",
        }
    }
}

impl std::fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Database connection pool wrapper
///
/// This enum holds the actual database pool for the connected backend.
#[derive(Clone)]
pub enum DatabasePool {
    /// SQLite pool
    Sqlite(SqlitePool),
    /// PostgreSQL pool
    Postgres(PgPool),
    /// MySQL pool
    MySql(MySqlPool),
}

impl DatabasePool {
    /// Get the database backend for this pool
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            DatabasePool::Sqlite(_) => DatabaseBackend::SQLite,
            DatabasePool::Postgres(_) => DatabaseBackend::PostgreSQL,
            DatabasePool::MySql(_) => DatabaseBackend::MySQL,
        }
    }

    /// Create a new database pool from connection URL
    pub async fn from_url(url: &str) -> Result<Self> {
        let backend = DatabaseBackend::from_url(url)?;

        match backend {
            DatabaseBackend::SQLite => {
                // Strip the sqlite: or sqlite:// prefix
                let db_path = if let Some(stripped) = url.strip_prefix("sqlite://") {
                    stripped
                } else if let Some(stripped) = url.strip_prefix("sqlite:") {
                    stripped
                } else {
                    url
                };

                let pool = SqlitePool::connect(db_path).await?;
                Ok(DatabasePool::Sqlite(pool))
            }
            DatabaseBackend::PostgreSQL => {
                let pool = PgPool::connect(url).await?;
                Ok(DatabasePool::Postgres(pool))
            }
            DatabaseBackend::MySQL => {
                let pool = MySqlPool::connect(url).await?;
                Ok(DatabasePool::MySql(pool))
            }
        }
    }

    /// Test the connection
    pub async fn test_connection(&self) -> Result<()> {
        match self {
            DatabasePool::Sqlite(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await?;
            }
            DatabasePool::MySql(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await?;
            }
        }
        Ok(())
    }
}
