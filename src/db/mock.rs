//! Mock database clients for testing.
//!
//! Provide in-memory implementations of `DatabaseClient` so the pipeline
//! and session can be tested without real database files.

use super::{ColumnInfo, DatabaseClient, QueryResult, Row, Schema};
use crate::error::{Result, SqlRagError};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock database client that returns predefined results.
#[derive(Default)]
pub struct MockDatabaseClient {
    schema: Schema,
    /// Scripted results: (SQL substring, result) pairs checked in order.
    canned_results: Vec<(String, QueryResult)>,
    /// SQL statements executed, for assertions.
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new mock database client with the given schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Adds a canned result returned when the executed SQL contains `pattern`.
    pub fn with_result(
        mut self,
        pattern: impl Into<String>,
        columns: Vec<ColumnInfo>,
        rows: Vec<Row>,
    ) -> Self {
        self.canned_results
            .push((pattern.into(), QueryResult::with_data(columns, rows)));
        self
    }

    /// Returns the SQL statements executed so far.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.lock().expect("executed lock poisoned").clone()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed
            .lock()
            .expect("executed lock poisoned")
            .push(sql.to_string());

        for (pattern, result) in &self.canned_results {
            if sql.contains(pattern.as_str()) {
                return Ok(result.clone());
            }
        }

        Err(SqlRagError::query(format!(
            "near \"{}\": syntax error",
            sql.split_whitespace().next().unwrap_or("")
        )))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose every operation fails.
///
/// Used to test error propagation at the schema and executor boundaries.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Err(SqlRagError::query(self.message.clone()))
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(SqlRagError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
