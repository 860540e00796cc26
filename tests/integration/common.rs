//! Shared fixtures for integration tests.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};

/// Creates a SQLite database file with the given name and setup statements.
pub async fn create_db(dir: &Path, name: &str, statements: &[&str]) -> PathBuf {
    let path = dir.join(name);

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to create fixture database");

    for statement in statements {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("failed to run fixture statement");
    }

    pool.close().await;
    path
}

/// Creates the canonical users fixture: `Table users: id (INTEGER), name (TEXT)`
/// with three rows.
pub async fn create_users_db(dir: &Path) -> PathBuf {
    create_db(
        dir,
        "users.db",
        &[
            "CREATE TABLE users (id INTEGER, name TEXT)",
            "INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, 'Bob'), (3, 'Carol')",
        ],
    )
    .await
}
