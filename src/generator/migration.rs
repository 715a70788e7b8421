//! Migration patch engine
//!
//! Treats a Laravel migration file as an ordered sequence of text lines and
//! patches it in place: listing the column-definition lines of the
//! create-table block, and inserting new definitions at the right spot.
//! There is no tokenizer and no AST - only the specific anchor substrings
//! of the one migration idiom this tool generates. Files that do not match
//! the idiom are refused, never silently corrupted.
//!
//! Every operation is a full read-modify-write of the file; nothing is
//! cached between operations.

use crate::cli::session::Selection;
use crate::config::AppConfig;
use crate::error::{ModelForgeError, Result};
use crate::generator::artisan::ShellRunner;
use crate::generator::files::FileStore;
use std::path::PathBuf;

/// Indentation for inserted column definitions (three 4-space levels).
pub const FIELD_INDENT: &str = "            ";

const BLOCK_OPEN: &str = "Schema::create(";
const BLOCK_CLOSE: &str = "});";
const TIMESTAMPS_CALL: &str = "$table->timestamps();";

/// One parsed column-definition line from the create-table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    /// The trimmed source line.
    pub raw: String,
    /// Blueprint method name, e.g. "string" in `$table->string('name');`.
    pub type_token: String,
    /// The column name (first quoted argument).
    pub name: String,
    /// Whether the line carries a `->nullable()` call.
    pub nullable: bool,
}

impl FieldLine {
    /// Parse a migration line into a field definition, or `None` if the line
    /// is not a column definition.
    pub fn parse(line: &str) -> Option<Self> {
        if !is_field_line(line) {
            return None;
        }

        let trimmed = line.trim();
        let type_token = between(trimmed, "$table->", "('").unwrap_or_default();
        let arguments = between(trimmed, "(", ")").unwrap_or_default();
        let first_argument = arguments.split(',').next().unwrap_or("");
        let name = between(first_argument, "'", "'").unwrap_or_default();

        Some(Self {
            raw: trimmed.to_string(),
            type_token: type_token.to_string(),
            name: name.to_string(),
            nullable: trimmed.contains("->nullable()"),
        })
    }
}

/// Column-definition predicate: starts with `$table->`, opens a quoted
/// argument list and ends with a semicolon. `$table->id();` and
/// `$table->timestamps();` are housekeeping calls, not columns, and do not
/// match.
pub fn is_field_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("$table->") && trimmed.contains("('") && trimmed.ends_with(';')
}

/// Substring of `text` strictly between the first `before` and the next
/// `after` following it.
fn between<'a>(text: &'a str, before: &str, after: &str) -> Option<&'a str> {
    let start = text.find(before)? + before.len();
    let rest = &text[start..];
    let end = rest.find(after)?;
    Some(&rest[..end])
}

/// Index of the first line whose trimmed text equals `needle`, at or after
/// `from`.
pub(crate) fn find_line_eq(lines: &[String], needle: &str, from: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| line.trim() == needle)
        .map(|(i, _)| i)
}

/// Index of the first line whose trimmed text starts with `prefix`, at or
/// after `from`.
pub(crate) fn find_line_starting(lines: &[String], prefix: &str, from: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| line.trim().starts_with(prefix))
        .map(|(i, _)| i)
}

/// The trimmed lines strictly between the `Schema::create(` opener and the
/// `});` closer. An absent boundary yields an empty list, not an error:
/// callers treat empty as "nothing to show".
pub fn field_block(lines: &[String]) -> Vec<String> {
    let Some(start) = find_line_starting(lines, BLOCK_OPEN, 0) else {
        return Vec::new();
    };
    let Some(end) = find_line_eq(lines, BLOCK_CLOSE, start) else {
        return Vec::new();
    };

    lines[start + 1..end]
        .iter()
        .map(|line| line.trim().to_string())
        .collect()
}

/// All column definitions in the file, in source order.
pub fn parse_fields(lines: &[String]) -> Vec<FieldLine> {
    lines.iter().filter_map(|line| FieldLine::parse(line)).collect()
}

/// Insert `definition` as a new indented line before the create-table
/// block's closing `});` - or before a trailing `$table->timestamps();` call
/// when present, so new columns always land above the housekeeping
/// timestamp columns. Returns `None` when no closing line exists.
pub fn insert_definition(lines: &[String], definition: &str) -> Option<Vec<String>> {
    let close = find_line_eq(lines, BLOCK_CLOSE, 0)?;

    let index = if close > 0 && lines[close - 1].trim() == TIMESTAMPS_CALL {
        close - 1
    } else {
        close
    };

    let mut patched = lines.to_vec();
    patched.insert(index, format!("{}{}", FIELD_INDENT, definition));
    Some(patched)
}

/// Locates and patches the migration file for the currently selected table.
pub struct MigrationPatcher<'a, S: FileStore, R: ShellRunner> {
    config: &'a AppConfig,
    store: &'a S,
    runner: &'a R,
}

impl<'a, S: FileStore, R: ShellRunner> MigrationPatcher<'a, S, R> {
    pub fn new(config: &'a AppConfig, store: &'a S, runner: &'a R) -> Self {
        Self {
            config,
            store,
            runner,
        }
    }

    /// The migration's logical name, `create_<table>_table`.
    pub fn migration_name(selection: &Selection) -> String {
        format!("create_{}_table", selection.table)
    }

    fn find_file(&self, selection: &Selection) -> Result<Option<PathBuf>> {
        let suffix = format!("{}.php", Self::migration_name(selection));
        let matches = self
            .store
            .search_files(&self.config.migrations_dir(), &suffix)?;
        Ok(matches.into_iter().next())
    }

    /// Find the migration file, scaffolding it through artisan exactly once
    /// when absent.
    pub async fn locate(&self, selection: &Selection) -> Result<PathBuf> {
        if let Some(path) = self.find_file(selection)? {
            return Ok(path);
        }

        let command = self.config.artisan_command(&format!(
            "make:migration {} --create={}",
            Self::migration_name(selection),
            selection.table
        ));
        let output = self.runner.run(&command).await?;
        if !output.trim().is_empty() {
            println!("{}", output.trim_end());
        }

        self.find_file(selection)?
            .ok_or_else(|| ModelForgeError::MigrationNotFound(selection.table.clone()))
    }

    fn read_lines(&self, path: &PathBuf) -> Result<Vec<String>> {
        Ok(self
            .store
            .read_file(path)?
            .split('\n')
            .map(str::to_string)
            .collect())
    }

    /// The trimmed create-table block lines, for display.
    pub async fn field_block(&self, selection: &Selection) -> Result<Vec<String>> {
        let path = self.locate(selection).await?;
        Ok(field_block(&self.read_lines(&path)?))
    }

    /// The parsed column definitions, in migration order.
    pub async fn fields(&self, selection: &Selection) -> Result<Vec<FieldLine>> {
        let path = self.locate(selection).await?;
        Ok(parse_fields(&self.read_lines(&path)?))
    }

    /// Insert one column definition and write the file back.
    pub async fn insert_field(&self, selection: &Selection, definition: &str) -> Result<()> {
        let path = self.locate(selection).await?;
        let lines = self.read_lines(&path)?;

        let patched = insert_definition(&lines, definition).ok_or_else(|| {
            ModelForgeError::InsertionPointNotFound(path.display().to_string())
        })?;

        self.store.write_file(&path, &patched.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    const MIGRATION: &str = "\
<?php

use Illuminate\\Database\\Migrations\\Migration;
use Illuminate\\Database\\Schema\\Blueprint;
use Illuminate\\Support\\Facades\\Schema;

return new class extends Migration
{
    public function up(): void
    {
        Schema::create('widgets', function (Blueprint $table) {
            $table->id();
            $table->timestamps();
        });
    }

    public function down(): void
    {
        Schema::dropIfExists('widgets');
    }
};
";

    #[test]
    fn test_field_block_boundaries() {
        let block = field_block(&lines(MIGRATION));
        assert_eq!(block, vec!["$table->id();", "$table->timestamps();"]);
    }

    #[test]
    fn test_field_block_without_opener_is_empty() {
        let block = field_block(&lines("<?php\n$x = 1;\n});"));
        assert!(block.is_empty());
    }

    #[test]
    fn test_field_block_without_closer_is_empty() {
        let block = field_block(&lines(
            "Schema::create('widgets', function (Blueprint $table) {\n    $table->id();",
        ));
        assert!(block.is_empty());
    }

    #[test]
    fn test_insert_before_timestamps() {
        let patched = insert_definition(&lines(MIGRATION), "$table->string('name');").unwrap();
        let timestamps = find_line_eq(&patched, "$table->timestamps();", 0).unwrap();
        let inserted = find_line_eq(&patched, "$table->string('name');", 0).unwrap();
        assert!(inserted < timestamps);
        assert_eq!(patched[inserted], "            $table->string('name');");
    }

    #[test]
    fn test_insert_before_closer_without_timestamps() {
        let source = lines(
            "Schema::create('widgets', function (Blueprint $table) {\n    $table->id();\n});",
        );
        let patched = insert_definition(&source, "$table->string('name');").unwrap();
        assert_eq!(patched[2].trim(), "$table->string('name');");
        assert_eq!(patched[3].trim(), "});");
    }

    #[test]
    fn test_insert_without_closer_fails() {
        let source = lines("Schema::create('widgets', function (Blueprint $table) {");
        assert!(insert_definition(&source, "$table->string('name');").is_none());
    }

    #[test]
    fn test_is_field_line() {
        assert!(is_field_line("            $table->string('name');"));
        assert!(is_field_line("$table->decimal('price', 30, 10);"));
        assert!(!is_field_line("$table->id();"));
        assert!(!is_field_line("$table->timestamps();"));
        assert!(!is_field_line("});"));
    }

    #[test]
    fn test_parse_field_line() {
        let field = FieldLine::parse("    $table->string('title')->nullable();").unwrap();
        assert_eq!(field.type_token, "string");
        assert_eq!(field.name, "title");
        assert!(field.nullable);

        let field = FieldLine::parse("$table->decimal('price', 30, 10);").unwrap();
        assert_eq!(field.type_token, "decimal");
        assert_eq!(field.name, "price");
        assert!(!field.nullable);
    }

    #[test]
    fn test_parse_fields_keeps_migration_order() {
        let mut source = lines(MIGRATION);
        source = insert_definition(&source, "$table->string('name');").unwrap();
        source = insert_definition(&source, "$table->integer('count')->nullable();").unwrap();

        let fields = parse_fields(&source);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "count"]);
    }
}
