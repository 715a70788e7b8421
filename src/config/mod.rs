//! Configuration module
//!
//! Resolves the application configuration from the stored TOML file and the
//! environment, and derives the Laravel project paths everything else uses.

pub mod storage;

use std::env;
use std::path::PathBuf;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the Laravel project checkout
    pub project_dir: PathBuf,
    /// Database connection URL, when table listing is wanted
    pub database_url: Option<String>,
    /// PHP binary used to invoke artisan
    pub php_binary: String,
}

impl AppConfig {
    /// Load configuration: stored file first, environment overrides second.
    ///
    /// `MODEL_FORGE_PROJECT` overrides the project directory and
    /// `DATABASE_URL` the database connection; both are also picked up from
    /// a `.env` file when the caller has run dotenv.
    pub fn load() -> Self {
        let stored = storage::ConfigFile::load().unwrap_or_default();

        let project_dir = env::var("MODEL_FORGE_PROJECT")
            .ok()
            .or(stored.project_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let database_url = env::var("DATABASE_URL").ok().or(stored.database_url);
        let php_binary = stored.php_binary.unwrap_or_else(|| "php".to_string());

        Self {
            project_dir,
            database_url,
            php_binary,
        }
    }

    /// The project's migrations directory.
    pub fn migrations_dir(&self) -> PathBuf {
        self.project_dir.join("database").join("migrations")
    }

    /// The project's models directory.
    pub fn models_dir(&self) -> PathBuf {
        self.project_dir.join("app").join("Models")
    }

    /// Canonical path of a model file.
    pub fn model_path(&self, model_camel: &str) -> PathBuf {
        self.models_dir().join(format!("{}.php", model_camel))
    }

    /// Full shell command line for an artisan invocation.
    pub fn artisan_command(&self, args: &str) -> String {
        format!("{} artisan {}", self.php_binary, args)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            database_url: None,
            php_binary: "php".to_string(),
        }
    }
}
