//! Interactive session
//!
//! Drives the top-level menu loop: selecting or adding a model, adding
//! columns to its migration, running migrations and rebuilding the model
//! file. All state lives in the session; the engines re-read the files on
//! every operation.

use crate::cli::fields::{ColumnChoice, COLUMN_MENU};
use crate::cli::menu::Menu;
use crate::config::AppConfig;
use crate::database::catalog::{model_names, SchemaCatalog};
use crate::error::{ModelForgeError, Result};
use crate::generator::artisan::ShellRunner;
use crate::generator::files::FileStore;
use crate::generator::migration::{FieldLine, MigrationPatcher};
use crate::generator::model::ModelBuilder;
use crate::naming;
use comfy_table::Table;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// The currently selected model and its derived names.
///
/// Invariant: `table` is always the pluralized form of `snake`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Camel-case model name, e.g. "UserProfile"
    pub camel: String,
    /// Snake-case name, e.g. "user_profile"
    pub snake: String,
    /// Plural snake-case table name, e.g. "user_profiles"
    pub table: String,
}

impl Selection {
    /// Build a selection from a space-delimited phrase ("add model" path).
    pub fn from_phrase(phrase: &str) -> Self {
        let snake = naming::snake_from_spaced(phrase);
        Self {
            camel: naming::camel_from_spaced(phrase),
            table: naming::pluralize(&snake),
            snake,
        }
    }

    /// Build a selection from a camel-case identifier ("select existing"
    /// path).
    pub fn from_camel(camel: &str) -> Self {
        let snake = naming::snake_from_camel(camel);
        Self {
            camel: camel.to_string(),
            table: naming::pluralize(&snake),
            snake,
        }
    }
}

/// One top-level menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    /// Select an existing model by its camel-case name
    Select(String),
    AddModel,
    AddFields,
    RunMigrations,
    BuildModel,
}

/// Resolve a menu key into an action; `None` means the key is not part of
/// the menu protocol at all.
fn action_for(key: String, models: &[String]) -> Option<Action> {
    if models.contains(&key) {
        return Some(Action::Select(key));
    }

    match key.as_str() {
        "addModel" => Some(Action::AddModel),
        "addFields" => Some(Action::AddFields),
        "runMigrations" => Some(Action::RunMigrations),
        "buildModel" => Some(Action::BuildModel),
        _ => None,
    }
}

/// Interactive session over a Laravel project.
pub struct Session<'a, S: FileStore, R: ShellRunner> {
    config: &'a AppConfig,
    store: &'a S,
    runner: &'a R,
    catalog: Option<&'a dyn SchemaCatalog>,
    selection: Option<Selection>,
    editor: DefaultEditor,
}

impl<'a, S: FileStore, R: ShellRunner> Session<'a, S, R> {
    /// Create a new session. The catalog is optional: without one there are
    /// simply no existing models to offer.
    pub fn new(
        config: &'a AppConfig,
        store: &'a S,
        runner: &'a R,
        catalog: Option<&'a dyn SchemaCatalog>,
    ) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| {
            ModelForgeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to initialize editor: {}", e),
            ))
        })?;

        Ok(Self {
            config,
            store,
            runner,
            catalog,
            selection: None,
            editor,
        })
    }

    /// Run the menu loop until the user cancels.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let models = self.existing_models().await;

            let mut menu = Menu::new();
            self.menu_header(&mut menu);
            menu.set_title("Select an action");
            for model in &models {
                menu.add_option(model.clone(), model.clone());
            }
            menu.add_option("addModel", "Add model");
            if self.selection.is_some() {
                menu.add_options([
                    ("addFields", "Add fields"),
                    ("runMigrations", "Run migrations"),
                    ("buildModel", "Build model"),
                ]);
            }

            let Some(key) = menu.open()? else {
                break;
            };

            match action_for(key, &models) {
                Some(Action::Select(camel)) => {
                    self.selection = Some(Selection::from_camel(&camel));
                }
                Some(Action::AddModel) => {
                    if let Err(e) = self.add_model() {
                        eprintln!("Error: {}", e);
                    }
                }
                Some(Action::AddFields) => {
                    if let Err(e) = self.add_fields().await {
                        eprintln!("Error: {}", e);
                    }
                }
                Some(Action::RunMigrations) => {
                    if let Err(e) = self.run_migrations().await {
                        eprintln!("Error: {}", e);
                    }
                }
                Some(Action::BuildModel) => {
                    if let Err(e) = self.build_model().await {
                        eprintln!("Error: {}", e);
                    }
                }
                None => {
                    // A key we never offered: the menu protocol is broken,
                    // stop the whole process rather than guess.
                    eprintln!("Unknown menu option - aborting");
                    std::process::exit(1);
                }
            }
        }

        Ok(())
    }

    /// The current selection, or `NoModelSelected`.
    fn require_selection(&self) -> Result<Selection> {
        self.selection.clone().ok_or(ModelForgeError::NoModelSelected)
    }

    /// Header lines shown at the top of every menu.
    fn menu_header(&self, menu: &mut Menu) {
        let (model, table) = match &self.selection {
            Some(selection) => (selection.camel.clone(), selection.table.clone()),
            None => ("(none)".to_string(), "(none)".to_string()),
        };

        menu.add_line_break();
        menu.add_static(format!("Model: {}", model));
        menu.add_static(format!("Table: {}", table));
        menu.add_line_break();
    }

    /// Same header, printed to stdout before a free-text question.
    fn print_header(&self) {
        println!();
        match &self.selection {
            Some(selection) => {
                println!("Model: {}", selection.camel);
                println!("Table: {}", selection.table);
            }
            None => {
                println!("Model: (none)");
                println!("Table: (none)");
            }
        }
        println!();
    }

    /// Ask a free-text question. `None` means the user cancelled.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(&format!("{}: ", prompt)) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(&line);
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(ModelForgeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                e.to_string(),
            ))),
        }
    }

    /// Existing models derived from the database's table names. Catalog
    /// failures are reported and treated as "no existing models".
    async fn existing_models(&self) -> Vec<String> {
        let Some(catalog) = self.catalog else {
            return Vec::new();
        };

        match catalog.list_tables().await {
            Ok(tables) => model_names(&tables),
            Err(e) => {
                eprintln!("Error: could not list tables: {}", e);
                Vec::new()
            }
        }
    }

    /// "Add model": ask for a space-delimited name and select it.
    fn add_model(&mut self) -> Result<()> {
        self.print_header();

        let Some(name) = self.ask("Model name")? else {
            return Ok(());
        };

        if name.trim().is_empty() {
            return Ok(());
        }

        self.selection = Some(Selection::from_phrase(&name));
        Ok(())
    }

    /// "Add fields": loop asking for a column name and type, patching the
    /// migration after each answer, until the user cancels.
    async fn add_fields(&mut self) -> Result<()> {
        let selection = self.require_selection()?;
        let patcher = MigrationPatcher::new(self.config, self.store, self.runner);

        loop {
            let fields = patcher.fields(&selection).await?;
            print_fields_table(&fields);

            let Some(name) = self.ask("Field name (Ctrl-C to finish)")? else {
                break;
            };
            if name.trim().is_empty() {
                continue;
            }
            let column = naming::snake_from_spaced(&name);

            let mut menu = Menu::new();
            for line in patcher.field_block(&selection).await? {
                menu.add_static(line);
            }
            menu.add_line_break();
            menu.set_title(format!("Select a type for column \"{}\"", column));
            menu.add_options(COLUMN_MENU.iter().copied());

            let Some(key) = menu.open()? else {
                break;
            };

            let Some(choice) = ColumnChoice::from_key(&key) else {
                eprintln!("Unknown menu option - aborting");
                std::process::exit(1);
            };

            patcher
                .insert_field(&selection, &choice.definition(&column))
                .await?;
        }

        Ok(())
    }

    /// "Run migrations": `artisan migrate:fresh`, output echoed.
    async fn run_migrations(&self) -> Result<()> {
        let _ = self.require_selection()?;

        let output = self
            .runner
            .run(&self.config.artisan_command("migrate:fresh"))
            .await?;
        println!("{}", output.trim_end());
        Ok(())
    }

    /// "Build model": regenerate the model file from the migration.
    async fn build_model(&self) -> Result<()> {
        let selection = self.require_selection()?;

        let patcher = MigrationPatcher::new(self.config, self.store, self.runner);
        let fields = patcher.fields(&selection).await?;

        let builder = ModelBuilder::new(self.config, self.store, self.runner);
        builder.build(&selection, &fields).await?;

        println!("Model {} rebuilt.", selection.camel);
        Ok(())
    }
}

/// Render the current columns as a table.
fn print_fields_table(fields: &[FieldLine]) {
    if fields.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Nullable"]);
    for field in fields {
        table.add_row(vec![
            field.name.clone(),
            field.type_token.clone(),
            if field.nullable { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", table);
}
