//! Database abstraction layer for sqlrag.
//!
//! Provides a trait-based interface for database operations, allowing the
//! real SQLite backend and test mocks to be used interchangeably.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::{Column, Schema, Table};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Opens a database client for the given SQLite file.
///
/// This is the central factory function for database connections.
pub async fn open(path: &Path) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::open(path).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with SqlRagError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Introspects the database schema, returning table and column information.
    async fn introspect_schema(&self) -> Result<Schema>;

    /// Executes a SQL statement and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
