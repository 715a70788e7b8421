//! Integration test for Model-Forge
//!
//! Exercises the migration patch engine and the model regeneration engine
//! against a real (temporary) Laravel-shaped project tree, with a fake
//! artisan runner that writes the same skeletons artisan would.

use async_trait::async_trait;
use model_forge::cli::Selection;
use model_forge::config::AppConfig;
use model_forge::error::Result;
use model_forge::generator::{DiskStore, MigrationPatcher, ModelBuilder, ShellRunner};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Fake artisan: records every command and writes the skeleton files the
/// real scaffold commands would create.
struct FakeArtisan {
    project_dir: PathBuf,
    commands: Mutex<Vec<String>>,
}

impl FakeArtisan {
    fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            commands: Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellRunner for FakeArtisan {
    async fn run(&self, command: &str) -> Result<String> {
        self.commands.lock().unwrap().push(command.to_string());

        if command.contains("make:migration") {
            // php artisan make:migration create_<table>_table --create=<table>
            let table = command
                .split("--create=")
                .nth(1)
                .unwrap()
                .trim()
                .to_string();
            let dir = self.project_dir.join("database").join("migrations");
            fs::create_dir_all(&dir).unwrap();
            fs::write(
                dir.join(format!("2024_05_01_000000_create_{}_table.php", table)),
                migration_skeleton(&table),
            )
            .unwrap();
        } else if command.contains("make:model") {
            let model = command.split_whitespace().last().unwrap().to_string();
            let dir = self.project_dir.join("app").join("Models");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("{}.php", model)), model_skeleton(&model)).unwrap();
        }

        Ok(String::new())
    }
}

fn migration_skeleton(table: &str) -> String {
    format!(
        "<?php

use Illuminate\\Database\\Migrations\\Migration;
use Illuminate\\Database\\Schema\\Blueprint;
use Illuminate\\Support\\Facades\\Schema;

return new class extends Migration
{{
    public function up(): void
    {{
        Schema::create('{table}', function (Blueprint $table) {{
            $table->id();
            $table->timestamps();
        }});
    }}

    public function down(): void
    {{
        Schema::dropIfExists('{table}');
    }}
}};
"
    )
}

fn model_skeleton(model: &str) -> String {
    format!(
        "<?php

namespace App\\Models;

use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;
use Illuminate\\Database\\Eloquent\\Model;

class {model} extends Model
{{
    use HasFactory;
}}
"
    )
}

fn project_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        project_dir: dir.path().to_path_buf(),
        database_url: None,
        php_binary: "php".to_string(),
    }
}

#[tokio::test]
async fn test_add_fields_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = project_config(&dir);
    let store = DiskStore;
    let runner = FakeArtisan::new(dir.path());

    let selection = Selection::from_phrase("user profile");
    assert_eq!(selection.table, "user_profiles");

    let patcher = MigrationPatcher::new(&config, &store, &runner);

    // No migration on disk yet: the patcher must scaffold one, exactly once.
    let fields = patcher.fields(&selection).await.unwrap();
    assert!(fields.is_empty());
    assert_eq!(
        runner.commands(),
        vec!["php artisan make:migration create_user_profiles_table --create=user_profiles"]
    );

    patcher
        .insert_field(&selection, "$table->string('nickname');")
        .await
        .unwrap();
    patcher
        .insert_field(&selection, "$table->integer('age')->nullable();")
        .await
        .unwrap();

    let migration_path = dir
        .path()
        .join("database/migrations/2024_05_01_000000_create_user_profiles_table.php");
    let content = fs::read_to_string(&migration_path).unwrap();

    // Both fields sit above the timestamps call, in insertion order.
    let nickname_at = content.find("$table->string('nickname');").unwrap();
    let age_at = content.find("$table->integer('age')->nullable();").unwrap();
    let timestamps_at = content.find("$table->timestamps();").unwrap();
    assert!(nickname_at < age_at);
    assert!(age_at < timestamps_at);

    // Scaffolding ran only for the initial creation.
    assert_eq!(runner.commands().len(), 1);

    let fields = patcher.fields(&selection).await.unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["nickname", "age"]);
}

#[tokio::test]
async fn test_build_model_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = project_config(&dir);
    let store = DiskStore;
    let runner = FakeArtisan::new(dir.path());

    let selection = Selection::from_phrase("widget");
    let patcher = MigrationPatcher::new(&config, &store, &runner);

    patcher
        .insert_field(&selection, "$table->string('name');")
        .await
        .unwrap();
    patcher
        .insert_field(&selection, "$table->timestamp('shipped_at')->nullable();")
        .await
        .unwrap();

    // A stale model file must be replaced, not patched in place.
    let model_path = dir.path().join("app/Models/Widget.php");
    fs::create_dir_all(model_path.parent().unwrap()).unwrap();
    fs::write(&model_path, "stale").unwrap();

    let fields = patcher.fields(&selection).await.unwrap();
    let builder = ModelBuilder::new(&config, &store, &runner);
    builder.build(&selection, &fields).await.unwrap();

    let content = fs::read_to_string(&model_path).unwrap();
    assert!(!content.contains("stale"));

    // Doc block above the class, in migration order.
    let name_at = content.find(" * @property string $name").unwrap();
    let shipped_at = content
        .find(" * @property \\DateTimeInterface|null $shipped_at")
        .unwrap();
    let class_at = content.find("class Widget extends Model").unwrap();
    assert!(name_at < shipped_at);
    assert!(shipped_at < class_at);

    // Fillable list inside the class body.
    let fillable_at = content.find("protected $fillable = [").unwrap();
    assert!(class_at < fillable_at);
    assert!(content.contains("        'name',"));
    assert!(content.contains("        'shipped_at',"));
}

#[tokio::test]
async fn test_insert_refuses_foreign_migration() {
    let dir = TempDir::new().unwrap();
    let config = project_config(&dir);
    let store = DiskStore;
    let runner = FakeArtisan::new(dir.path());

    // A migration without the expected closing line cannot be patched.
    let migrations = dir.path().join("database/migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("2024_05_01_000000_create_gadgets_table.php"),
        "<?php\n// raw SQL migration, no Schema::create block\n",
    )
    .unwrap();

    let selection = Selection::from_phrase("gadget");
    let patcher = MigrationPatcher::new(&config, &store, &runner);

    // Listing yields nothing rather than failing.
    assert!(patcher.field_block(&selection).await.unwrap().is_empty());

    // Inserting fails and leaves the file untouched.
    let result = patcher
        .insert_field(&selection, "$table->string('name');")
        .await;
    assert!(result.is_err());
    let content =
        fs::read_to_string(migrations.join("2024_05_01_000000_create_gadgets_table.php")).unwrap();
    assert!(!content.contains("$table->string"));
}

#[tokio::test]
async fn test_oldest_migration_wins_on_duplicates() {
    let dir = TempDir::new().unwrap();
    let config = project_config(&dir);
    let store = DiskStore;
    let runner = FakeArtisan::new(dir.path());

    let migrations = dir.path().join("database/migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("2024_06_01_000000_create_things_table.php"),
        migration_skeleton("things"),
    )
    .unwrap();
    fs::write(
        migrations.join("2024_05_01_000000_create_things_table.php"),
        migration_skeleton("things"),
    )
    .unwrap();

    let selection = Selection::from_phrase("thing");
    let patcher = MigrationPatcher::new(&config, &store, &runner);
    patcher
        .insert_field(&selection, "$table->string('label');")
        .await
        .unwrap();

    let older =
        fs::read_to_string(migrations.join("2024_05_01_000000_create_things_table.php")).unwrap();
    let newer =
        fs::read_to_string(migrations.join("2024_06_01_000000_create_things_table.php")).unwrap();
    assert!(older.contains("$table->string('label');"));
    assert!(!newer.contains("$table->string('label');"));
}
