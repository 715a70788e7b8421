//! Model regeneration engine
//!
//! Derives the two generated blocks of an Eloquent model - the `@property`
//! doc comment and the `$fillable` allow-list - from the migration's column
//! definitions, and splices them into a freshly scaffolded model file at its
//! structural anchors.

use crate::cli::session::Selection;
use crate::config::AppConfig;
use crate::error::{ModelForgeError, Result};
use crate::generator::artisan::ShellRunner;
use crate::generator::files::FileStore;
use crate::generator::migration::{find_line_starting, FieldLine};

/// Which structural anchor was missing from the model skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAnchor {
    /// No line starting with `class `
    ClassDeclaration,
    /// No line starting with `}`
    ClassClosing,
}

/// Map a Blueprint type token to the PHP type used in the doc block.
/// Unrecognized tokens map to `mixed`.
pub fn php_type(type_token: &str) -> &'static str {
    match type_token {
        "integer" | "unsignedBigInteger" | "bigInteger" | "boolean" => "int",
        "string" | "decimal" | "json" | "text" => "string",
        "timestamp" => "\\DateTimeInterface",
        _ => "mixed",
    }
}

/// The doc-block type for a column: the mapped PHP type, unioned with null
/// when the column is nullable.
pub fn property_type(field: &FieldLine) -> String {
    let base = php_type(&field.type_token);
    if field.nullable {
        format!("{}|null", base)
    } else {
        base.to_string()
    }
}

/// `@property` doc-comment block, one line per column in migration order.
pub fn doc_block(fields: &[FieldLine]) -> Vec<String> {
    let mut rows = vec!["/**".to_string()];

    for field in fields {
        rows.push(format!(" * @property {} ${}", property_type(field), field.name));
    }

    rows.push("*/".to_string());
    rows
}

/// `$fillable` declaration block, one quoted name per column in migration
/// order.
pub fn fillable_block(fields: &[FieldLine]) -> Vec<String> {
    let mut rows = vec![String::new(), "    protected $fillable = [".to_string()];

    for field in fields {
        rows.push(format!("        '{}',", field.name));
    }

    rows.push("    ];".to_string());
    rows
}

/// Splice the doc block before the first `class ` line and the fillable
/// block before the first `}` line, preserving everything else.
pub fn splice(
    lines: &[String],
    doc: &[String],
    fillable: &[String],
) -> std::result::Result<Vec<String>, MissingAnchor> {
    let class_at =
        find_line_starting(lines, "class ", 0).ok_or(MissingAnchor::ClassDeclaration)?;

    let mut patched = lines.to_vec();
    patched.splice(class_at..class_at, doc.iter().cloned());

    let close_at =
        find_line_starting(&patched, "}", 0).ok_or(MissingAnchor::ClassClosing)?;
    patched.splice(close_at..close_at, fillable.iter().cloned());

    Ok(patched)
}

/// Regenerates the model file for the currently selected model.
pub struct ModelBuilder<'a, S: FileStore, R: ShellRunner> {
    config: &'a AppConfig,
    store: &'a S,
    runner: &'a R,
}

impl<'a, S: FileStore, R: ShellRunner> ModelBuilder<'a, S, R> {
    pub fn new(config: &'a AppConfig, store: &'a S, runner: &'a R) -> Self {
        Self {
            config,
            store,
            runner,
        }
    }

    /// Rebuild the model file from scratch: delete the old file, scaffold a
    /// fresh skeleton through artisan, then splice in the blocks derived
    /// from `fields`.
    pub async fn build(&self, selection: &Selection, fields: &[FieldLine]) -> Result<()> {
        let path = self.config.model_path(&selection.camel);
        self.store.delete_file(&path)?;

        let command = self
            .config
            .artisan_command(&format!("make:model {}", selection.camel));
        let output = self.runner.run(&command).await?;
        if !output.trim().is_empty() {
            println!("{}", output.trim_end());
        }

        let lines: Vec<String> = self
            .store
            .read_file(&path)?
            .split('\n')
            .map(str::to_string)
            .collect();

        let patched = splice(&lines, &doc_block(fields), &fillable_block(fields)).map_err(
            |anchor| match anchor {
                MissingAnchor::ClassDeclaration => {
                    ModelForgeError::ClassDeclarationNotFound(path.display().to_string())
                }
                MissingAnchor::ClassClosing => {
                    ModelForgeError::ClassClosingNotFound(path.display().to_string())
                }
            },
        )?;

        self.store.write_file(&path, &patched.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(type_token: &str, name: &str, nullable: bool) -> FieldLine {
        let suffix = if nullable { "->nullable()" } else { "" };
        FieldLine::parse(&format!("$table->{}('{}'){};", type_token, name, suffix)).unwrap()
    }

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    const MODEL: &str = "\
<?php

namespace App\\Models;

use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;
use Illuminate\\Database\\Eloquent\\Model;

class Widget extends Model
{
    use HasFactory;
}
";

    #[test]
    fn test_php_type_map() {
        assert_eq!(php_type("integer"), "int");
        assert_eq!(php_type("unsignedBigInteger"), "int");
        assert_eq!(php_type("bigInteger"), "int");
        assert_eq!(php_type("boolean"), "int");
        assert_eq!(php_type("string"), "string");
        assert_eq!(php_type("decimal"), "string");
        assert_eq!(php_type("json"), "string");
        assert_eq!(php_type("text"), "string");
        assert_eq!(php_type("timestamp"), "\\DateTimeInterface");
        assert_eq!(php_type("uuid"), "mixed");
    }

    #[test]
    fn test_nullable_rendering() {
        assert_eq!(property_type(&field("string", "name", false)), "string");
        assert_eq!(property_type(&field("string", "name", true)), "string|null");
        assert_eq!(
            property_type(&field("timestamp", "seen_at", true)),
            "\\DateTimeInterface|null"
        );
    }

    #[test]
    fn test_doc_block_order_and_shape() {
        let fields = vec![
            field("string", "name", false),
            field("integer", "count", true),
        ];
        let doc = doc_block(&fields);
        assert_eq!(
            doc,
            vec![
                "/**",
                " * @property string $name",
                " * @property int|null $count",
                "*/",
            ]
        );
    }

    #[test]
    fn test_fillable_block_shape() {
        let fields = vec![
            field("string", "name", false),
            field("integer", "count", true),
        ];
        assert_eq!(
            fillable_block(&fields),
            vec![
                "",
                "    protected $fillable = [",
                "        'name',",
                "        'count',",
                "    ];",
            ]
        );
    }

    #[test]
    fn test_splice_anchors() {
        let fields = vec![field("string", "name", false)];
        let patched = splice(&lines(MODEL), &doc_block(&fields), &fillable_block(&fields)).unwrap();

        let text = patched.join("\n");
        let doc_at = text.find("@property string $name").unwrap();
        let class_at = text.find("class Widget").unwrap();
        let fillable_at = text.find("protected $fillable").unwrap();
        let close_at = text.rfind('}').unwrap();

        assert!(doc_at < class_at);
        assert!(class_at < fillable_at);
        assert!(fillable_at < close_at);
    }

    #[test]
    fn test_splice_missing_class_declaration() {
        let source = lines("<?php\n$x = 1;");
        assert_eq!(
            splice(&source, &[], &[]),
            Err(MissingAnchor::ClassDeclaration)
        );
    }

    #[test]
    fn test_splice_missing_class_closing() {
        let source = lines("<?php\nclass Widget extends Model\n{");
        assert_eq!(splice(&source, &[], &[]), Err(MissingAnchor::ClassClosing));
    }
}
