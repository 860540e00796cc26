//! Session orchestrator integration tests.
//!
//! End-to-end pipeline tests over real uploaded SQLite bytes, with the
//! LLM replaced by a scripted mock.

use std::sync::Arc;

use sqlrag::llm::MockLlmClient;
use sqlrag::session::{Role, Session};

use super::common::{create_db, create_users_db};

async fn read_fixture_bytes(path: &std::path::Path) -> Vec<u8> {
    tokio::fs::read(path).await.expect("failed to read fixture")
}

#[tokio::test]
async fn test_end_to_end_count_users() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = create_users_db(dir.path()).await;

    let llm = Arc::new(
        MockLlmClient::new()
            .with_queued_response("```sql\nSELECT COUNT(*) FROM users;\n```")
            .with_queued_response("There are 3 users in the database."),
    );
    let mut session = Session::new(Box::new(llm.clone()));

    let schema_text = session
        .load_database(&read_fixture_bytes(&fixture).await)
        .await
        .unwrap();
    assert_eq!(schema_text, "Table users: id (INTEGER), name (TEXT)");

    let answer = session.ask("How many users are there?").await.unwrap();

    assert!(answer.contains('3'));
    assert_eq!(llm.call_count(), 2);
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.transcript()[0].role, Role::User);
    assert_eq!(session.transcript()[0].content, "How many users are there?");
    assert_eq!(session.transcript()[1].role, Role::Assistant);

    session.teardown().await;
}

#[tokio::test]
async fn test_question_without_database_makes_zero_llm_calls() {
    let llm = Arc::new(MockLlmClient::new());
    let mut session = Session::new(Box::new(llm.clone()));

    let err = session.ask("How many users are there?").await.unwrap_err();

    assert!(err.to_string().contains("No database loaded"));
    assert_eq!(llm.call_count(), 0);
    assert!(session.transcript().is_empty());
}

#[tokio::test]
async fn test_unanswerable_question_gets_polite_answer() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = create_users_db(dir.path()).await;

    let llm = Arc::new(
        MockLlmClient::new()
            .with_queued_response("Invalid query")
            .with_response(
                "Error executing SQL",
                "I'm sorry, this question cannot be answered from the database.",
            ),
    );
    let mut session = Session::new(Box::new(llm.clone()));
    session
        .load_database(&read_fixture_bytes(&fixture).await)
        .await
        .unwrap();

    let answer = session.ask("What is the weather today?").await.unwrap();

    // The pattern response only matches when the execution failure was
    // rendered into the summarization prompt.
    assert!(answer.contains("cannot be answered"));
    assert_eq!(llm.call_count(), 2);

    session.teardown().await;
}

#[tokio::test]
async fn test_malformed_sql_error_reaches_summary_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = create_users_db(dir.path()).await;

    let llm = Arc::new(
        MockLlmClient::new()
            .with_queued_response("SELECT emal FROM users;")
            .with_response("emal", "The query failed: there is no column named 'emal'."),
    );
    let mut session = Session::new(Box::new(llm.clone()));
    session
        .load_database(&read_fixture_bytes(&fixture).await)
        .await
        .unwrap();

    let answer = session.ask("Show me the emal column").await.unwrap();

    assert!(answer.contains("emal"));

    session.teardown().await;
}

#[tokio::test]
async fn test_replacing_database_swaps_artifact_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let first = create_users_db(dir.path()).await;
    let second = create_db(
        dir.path(),
        "pets.db",
        &["CREATE TABLE pets (id INTEGER, species TEXT)"],
    )
    .await;

    let llm = Arc::new(MockLlmClient::new());
    let mut session = Session::new(Box::new(llm));

    session
        .load_database(&read_fixture_bytes(&first).await)
        .await
        .unwrap();
    let first_artifact = session.artifact_path().unwrap().to_path_buf();
    assert!(first_artifact.exists());

    session
        .load_database(&read_fixture_bytes(&second).await)
        .await
        .unwrap();
    let second_artifact = session.artifact_path().unwrap().to_path_buf();

    assert_ne!(first_artifact, second_artifact);
    assert!(!first_artifact.exists(), "old artifact should be deleted");
    assert!(second_artifact.exists());
    assert_eq!(
        session.schema_text().unwrap(),
        "Table pets: id (INTEGER), species (TEXT)"
    );

    session.teardown().await;
    assert!(!second_artifact.exists(), "teardown should delete artifact");
}

#[tokio::test]
async fn test_garbage_upload_leaves_session_without_database() {
    let llm = Arc::new(MockLlmClient::new());
    let mut session = Session::new(Box::new(llm.clone()));

    let result = session.load_database(b"this is not a sqlite file").await;

    assert!(result.is_err());
    assert!(!session.has_database());
    assert!(session.schema_text().is_none());

    // Questions are still rejected without touching the model.
    assert!(session.ask("anything").await.is_err());
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_artifact_paths_are_unique_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = create_users_db(dir.path()).await;
    let bytes = read_fixture_bytes(&fixture).await;

    let mut a = Session::new(Box::new(MockLlmClient::new()));
    let mut b = Session::new(Box::new(MockLlmClient::new()));

    a.load_database(&bytes).await.unwrap();
    b.load_database(&bytes).await.unwrap();

    assert_ne!(a.artifact_path().unwrap(), b.artifact_path().unwrap());

    a.teardown().await;
    b.teardown().await;
}
