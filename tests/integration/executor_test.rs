//! Query execution integration tests.
//!
//! Tests SQL execution, value conversion, and the failure-as-data boundary
//! over real SQLite files.

use pretty_assertions::assert_eq;
use sqlrag::db::{DatabaseClient, SqliteClient, Value};
use sqlrag::query::{execute_to_outcome, QueryOutcome};

use super::common::{create_db, create_users_db};

#[tokio::test]
async fn test_count_query_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_users_db(dir.path()).await;
    let client = SqliteClient::open(&path).await.unwrap();

    let outcome = execute_to_outcome(&client, "SELECT COUNT(*) FROM users;").await;

    assert_eq!(
        outcome,
        QueryOutcome::Success {
            columns: vec!["COUNT(*)".to_string()],
            rows: vec![vec![Value::Int(3)]],
        }
    );
    assert_eq!(outcome.render(), "Columns: COUNT(*)\nRows:\n(3)");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_select_preserves_value_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_db(
        dir.path(),
        "typed.db",
        &[
            "CREATE TABLE t (i INTEGER, f REAL, s TEXT, n TEXT, b BLOB)",
            "INSERT INTO t VALUES (42, 2.5, 'hello', NULL, x'0102')",
        ],
    )
    .await;
    let client = SqliteClient::open(&path).await.unwrap();

    let result = client.execute_query("SELECT * FROM t").await.unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(
        result.rows[0],
        vec![
            Value::Int(42),
            Value::Float(2.5),
            Value::Text("hello".to_string()),
            Value::Null,
            Value::Blob(vec![1, 2]),
        ]
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_missing_column_becomes_failure_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_users_db(dir.path()).await;
    let client = SqliteClient::open(&path).await.unwrap();

    let outcome = execute_to_outcome(&client, "SELECT emal FROM users;").await;

    let QueryOutcome::Failure { error } = outcome else {
        panic!("expected failure outcome");
    };
    assert!(error.contains("emal"), "error was: {error}");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_invalid_query_sentinel_becomes_failure_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_users_db(dir.path()).await;
    let client = SqliteClient::open(&path).await.unwrap();

    // The synthesizer's "not answerable" sentinel is not valid SQL, so it
    // fails at execution and flows through as data.
    let outcome = execute_to_outcome(&client, "Invalid query").await;

    assert!(outcome.is_failure());
    assert!(outcome.render().starts_with("Error executing SQL: "));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_empty_result_keeps_column_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_users_db(dir.path()).await;
    let client = SqliteClient::open(&path).await.unwrap();

    let outcome =
        execute_to_outcome(&client, "SELECT id, name FROM users WHERE id > 100").await;

    assert_eq!(
        outcome,
        QueryOutcome::Success {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![],
        }
    );
    assert_eq!(outcome.render(), "Columns: id, name\nRows:\n");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_returns_columns_in_result_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_users_db(dir.path()).await;
    let client = SqliteClient::open(&path).await.unwrap();

    let result = client
        .execute_query("SELECT name, id FROM users ORDER BY id")
        .await
        .unwrap();

    assert_eq!(result.column_names(), vec!["name", "id"]);
    assert_eq!(
        result.rows[0],
        vec![Value::Text("Alice".to_string()), Value::Int(1)]
    );

    client.close().await.unwrap();
}
