//! Execution boundary between synthesized SQL and the session.
//!
//! The SQL handed to this module is unverified model output. Every
//! execution failure is captured as a `QueryOutcome::Failure` value so the
//! orchestrator cannot forget to handle it; no error crosses this boundary.

use crate::db::{DatabaseClient, Row};
use tracing::debug;

/// The tagged result of executing a synthesized query.
///
/// Consumed only by the answer synthesis step; not persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The query executed and produced a (possibly empty) result set.
    Success {
        /// Column names in result order.
        columns: Vec<String>,
        /// Result rows, each a fixed-order tuple of values.
        rows: Vec<Row>,
    },
    /// The query failed; the engine's error text becomes data.
    Failure {
        /// Textual description of the execution error.
        error: String,
    },
}

impl QueryOutcome {
    /// Returns true if this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Renders the outcome as text for the answer summarization prompt.
    ///
    /// Success: `"Columns: <c1>, <c2>\nRows:\n(<v1>, <v2>)\n..."`.
    /// Failure: `"Error executing SQL: <error>"`.
    pub fn render(&self) -> String {
        match self {
            Self::Success { columns, rows } => {
                let row_lines = rows
                    .iter()
                    .map(|row| {
                        let values = row
                            .iter()
                            .map(|v| v.to_display_string())
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("({})", values)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Columns: {}\nRows:\n{}", columns.join(", "), row_lines)
            }
            Self::Failure { error } => format!("Error executing SQL: {}", error),
        }
    }
}

/// Executes a synthesized SQL statement, converting any error into data.
///
/// A single attempt per call; there are no retries.
pub async fn execute_to_outcome(db: &dyn DatabaseClient, sql: &str) -> QueryOutcome {
    match db.execute_query(sql).await {
        Ok(result) => {
            debug!(rows = result.rows.len(), "Query succeeded");
            QueryOutcome::Success {
                columns: result.column_names(),
                rows: result.rows,
            }
        }
        Err(e) => {
            debug!(error = %e, "Query failed; capturing as outcome");
            QueryOutcome::Failure {
                error: e.to_string(),
            }
        }
    }
}
