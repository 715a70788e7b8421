//! Column type menu
//!
//! The fixed set of column types offered when adding a field, and the
//! Laravel Blueprint definition line each one renders to.

/// Base column types the tool knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Foreign-key style id (`unsignedBigInteger`)
    Id,
    String,
    Text,
    Integer,
    BigInteger,
    Decimal,
    Boolean,
    Timestamp,
    Json,
}

impl ColumnKind {
    /// The Blueprint method for this kind.
    pub fn blueprint_call(self) -> &'static str {
        match self {
            ColumnKind::Id => "unsignedBigInteger",
            ColumnKind::String => "string",
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::BigInteger => "bigInteger",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::Json => "json",
        }
    }
}

/// A column type choice: base kind plus nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnChoice {
    pub kind: ColumnKind,
    pub nullable: bool,
}

/// Menu entries in display order: (key, label).
pub const COLUMN_MENU: &[(&str, &str)] = &[
    ("id", "ID"),
    ("idNull", "ID NULL"),
    ("string", "string"),
    ("stringNull", "string NULL"),
    ("text", "text"),
    ("textNull", "text NULL"),
    ("int", "INT"),
    ("intNull", "INT NULL"),
    ("bigInt", "BIGINT"),
    ("decimal", "DECIMAL (30,10)"),
    ("decimalNull", "DECIMAL (30,10) NULL"),
    ("boolean", "boolean"),
    ("timestampNull", "TIMESTAMP NULL"),
    ("jsonNull", "json NULL"),
];

impl ColumnChoice {
    /// Resolve a menu key back to a column choice.
    pub fn from_key(key: &str) -> Option<Self> {
        let (kind, nullable) = match key {
            "id" => (ColumnKind::Id, false),
            "idNull" => (ColumnKind::Id, true),
            "string" => (ColumnKind::String, false),
            "stringNull" => (ColumnKind::String, true),
            "text" => (ColumnKind::Text, false),
            "textNull" => (ColumnKind::Text, true),
            "int" => (ColumnKind::Integer, false),
            "intNull" => (ColumnKind::Integer, true),
            "bigInt" => (ColumnKind::BigInteger, false),
            "decimal" => (ColumnKind::Decimal, false),
            "decimalNull" => (ColumnKind::Decimal, true),
            "boolean" => (ColumnKind::Boolean, false),
            "timestampNull" => (ColumnKind::Timestamp, true),
            "jsonNull" => (ColumnKind::Json, true),
            _ => return None,
        };
        Some(Self { kind, nullable })
    }

    /// Render the Blueprint definition line for a column name, e.g.
    /// `$table->string('title')->nullable();`.
    pub fn definition(&self, column: &str) -> String {
        let mut definition = format!("$table->{}('{}')", self.kind.blueprint_call(), column);
        if self.nullable {
            definition.push_str("->nullable()");
        }
        definition.push(';');
        definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::migration::FieldLine;

    #[test]
    fn test_every_menu_key_resolves() {
        for (key, _) in COLUMN_MENU {
            assert!(ColumnChoice::from_key(key).is_some(), "unresolved key {}", key);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!(ColumnChoice::from_key("uuid").is_none());
    }

    #[test]
    fn test_definition_rendering() {
        let choice = ColumnChoice::from_key("stringNull").unwrap();
        assert_eq!(
            choice.definition("title"),
            "$table->string('title')->nullable();"
        );

        let choice = ColumnChoice::from_key("id").unwrap();
        assert_eq!(
            choice.definition("owner_id"),
            "$table->unsignedBigInteger('owner_id');"
        );
    }

    #[test]
    fn test_definitions_parse_back_as_field_lines() {
        for (key, _) in COLUMN_MENU {
            let choice = ColumnChoice::from_key(key).unwrap();
            let field = FieldLine::parse(&choice.definition("sample")).unwrap();
            assert_eq!(field.name, "sample");
            assert_eq!(field.type_token, choice.kind.blueprint_call());
            assert_eq!(field.nullable, choice.nullable);
        }
    }
}
