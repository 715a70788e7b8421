//! Schema catalog
//!
//! Lists the tables of the connected database so the session can offer
//! existing tables as selectable models. The bookkeeping `migrations` table
//! is never offered.

use crate::database::connection::DatabasePool;
use crate::error::Result;
use crate::naming;
use async_trait::async_trait;

/// Laravel's migration bookkeeping table, excluded from listings.
const BOOKKEEPING_TABLE: &str = "migrations";

/// Read-only view of the database's table names.
#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// Ordered table names, excluding the migration bookkeeping table.
    async fn list_tables(&self) -> Result<Vec<String>>;
}

/// Derive model names from table names: camelize the snake-case table name
/// and singularize it ("user_profiles" -> "UserProfile").
pub fn model_names(tables: &[String]) -> Vec<String> {
    tables
        .iter()
        .map(|table| naming::depluralize(&naming::camel_from_snake(table)))
        .collect()
}

/// [`SchemaCatalog`] backed by a live sqlx connection.
pub struct SqlCatalog {
    pool: DatabasePool,
}

impl SqlCatalog {
    /// Connect to the database and verify the connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = DatabasePool::from_url(url).await?;
        pool.test_connection().await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SchemaCatalog for SqlCatalog {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let tables: Vec<String> = match &self.pool {
            DatabasePool::Postgres(pool) => {
                sqlx::query_scalar(
                    r#"
                    SELECT table_name
                    FROM information_schema.tables
                    WHERE table_schema = 'public'
                        AND table_type = 'BASE TABLE'
                    ORDER BY table_name
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
            DatabasePool::MySql(pool) => {
                sqlx::query_scalar(
                    r#"
                    SELECT table_name
                    FROM information_schema.tables
                    WHERE table_schema = DATABASE()
                    ORDER BY table_name
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query_scalar(
                    r#"
                    SELECT name
                    FROM sqlite_master
                    WHERE type = 'table'
                        AND name NOT LIKE 'sqlite_%'
                    ORDER BY name
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tables
            .into_iter()
            .filter(|table| table != BOOKKEEPING_TABLE)
            .collect())
    }
}
