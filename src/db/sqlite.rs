//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait for uploaded SQLite files using sqlx.

use crate::db::{Column, ColumnInfo, DatabaseClient, QueryResult, Row, Schema, Table, Value};
use crate::error::{Result, SqlRagError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, Statement, TypeInfo, ValueRef};
use std::path::Path;
use tracing::debug;

/// SQLite database client over a single-connection pool.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Opens a client for an existing SQLite database file.
    ///
    /// The file must already exist; a missing or unreadable file is a
    /// connection error, not a reason to create an empty database.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                SqlRagError::connection(format!(
                    "Failed to open database at {}: {}",
                    path.display(),
                    e
                ))
            })?;

        debug!(path = %path.display(), "Opened SQLite database");

        Ok(Self { pool })
    }

    /// Creates a client from an existing pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches the names of all user tables, in catalog listing order.
    ///
    /// Internal `sqlite_*` catalog tables are excluded.
    async fn fetch_table_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SqlRagError::query(format!("Failed to fetch tables: {e}")))
    }

    /// Fetches columns for a specific table via `PRAGMA table_info`.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<Column>> {
        // PRAGMA arguments cannot be bound, so the identifier is quoted inline.
        let pragma = format!(
            "PRAGMA table_info(\"{}\")",
            table_name.replace('"', "\"\"")
        );

        let rows = sqlx::query(&pragma)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                SqlRagError::query(format!("Failed to fetch columns for {table_name}: {e}"))
            })?;

        rows.iter()
            .map(|row| {
                let name: String = row
                    .try_get("name")
                    .map_err(|e| SqlRagError::query(format!("Malformed table_info row: {e}")))?;
                let declared_type: String = row
                    .try_get("type")
                    .map_err(|e| SqlRagError::query(format!("Malformed table_info row: {e}")))?;
                let not_null: i64 = row.try_get("notnull").unwrap_or(0);
                let pk: i64 = row.try_get("pk").unwrap_or(0);

                Ok(Column::new(name, declared_type)
                    .not_null(not_null != 0)
                    .primary_key(pk != 0))
            })
            .collect()
    }

    /// Fetches column metadata for a query without executing it.
    ///
    /// Used when a result set has no rows to read the metadata from.
    async fn fetch_column_metadata(&self, sql: &str) -> Result<Vec<ColumnInfo>> {
        let statement = self
            .pool
            .prepare(sql)
            .await
            .map_err(|e| SqlRagError::query(e.to_string()))?;

        Ok(statement
            .columns()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
            .collect())
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        let table_names = self.fetch_table_names().await?;

        let mut tables = Vec::with_capacity(table_names.len());
        for name in table_names {
            let columns = self.fetch_columns(&name).await?;
            tables.push(Table { name, columns });
        }

        Ok(Schema { tables })
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let result = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SqlRagError::query(e.to_string()))?;

        // Column metadata comes from the first row when there is one; an
        // empty result set falls back to preparing the statement so the
        // column names survive (best-effort).
        let columns: Vec<ColumnInfo> = match result.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            None => self.fetch_column_metadata(sql).await.unwrap_or_default(),
        };

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        debug!(
            columns = columns.len(),
            rows = rows.len(),
            "Executed query"
        );

        Ok(QueryResult { columns, rows })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite typing is dynamic, so the storage class is taken from the value
/// itself rather than the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let Ok(raw) = row.try_get_raw(index) else {
        return Value::Null;
    };

    if raw.is_null() {
        return Value::Null;
    }

    match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),
        "REAL" => row
            .try_get::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(Value::Blob)
            .unwrap_or(Value::Null),
        // TEXT and anything else (DATE, DATETIME, ...) decodes as text.
        _ => row
            .try_get::<String, _>(index)
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}
