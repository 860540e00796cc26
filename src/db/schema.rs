//! Database schema types for sqlrag.
//!
//! Represents the structure of an uploaded database: tables and their
//! columns with declared types, as discovered from the SQLite catalog.

/// Represents the complete schema of a database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// All user tables, in catalog listing order.
    pub tables: Vec<Table>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats the schema for inclusion in LLM prompts.
    ///
    /// Renders one line per table:
    /// `Table <name>: <col1> (<type1>), <col2> (<type2>), ...`
    pub fn format_for_prompt(&self) -> String {
        self.tables
            .iter()
            .map(Table::format_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Represents a database table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Columns in the table, in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a new table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Renders the table as a single schema line.
    fn format_line(&self) -> String {
        let cols = self
            .columns
            .iter()
            .map(|c| format!("{} ({})", c.name, c.declared_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Table {}: {}", self.name, cols)
    }
}

/// Represents a column in a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared type from the table definition (e.g., "INTEGER", "TEXT").
    pub declared_type: String,

    /// Whether the column has a NOT NULL constraint.
    pub not_null: bool,

    /// Whether the column is part of the primary key.
    pub primary_key: bool,
}

impl Column {
    /// Creates a new column with the given name and declared type.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            not_null: false,
            primary_key: false,
        }
    }

    /// Sets the NOT NULL flag.
    pub fn not_null(self, not_null: bool) -> Self {
        Self { not_null, ..self }
    }

    /// Sets the primary key flag.
    pub fn primary_key(self, primary_key: bool) -> Self {
        Self {
            primary_key,
            ..self
        }
    }
}
