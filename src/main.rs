// Model-Forge: an interactive Laravel model/migration scaffolder
//
// This is the main entry point for the Model-Forge application.

use anyhow::Result;
use model_forge::cli::Session;
use model_forge::config::AppConfig;
use model_forge::database::catalog::{SchemaCatalog, SqlCatalog};
use model_forge::generator::{ArtisanRunner, DiskStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::load();

    println!("Model-Forge v{}", env!("CARGO_PKG_VERSION"));
    println!("Project: {}", config.project_dir.display());
    println!();

    let catalog = match &config.database_url {
        Some(url) => match SqlCatalog::connect(url).await {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                eprintln!("Warning: database unavailable ({}), existing tables will not be listed", e);
                None
            }
        },
        None => {
            println!("No DATABASE_URL configured; existing tables will not be listed.");
            None
        }
    };

    let store = DiskStore;
    let runner = ArtisanRunner::new(&config.project_dir);

    let mut session = Session::new(
        &config,
        &store,
        &runner,
        catalog.as_ref().map(|c| c as &dyn SchemaCatalog),
    )?;
    session.run().await?;

    println!("Goodbye!");
    Ok(())
}
