//! Per-session orchestration of the question-answering pipeline.
//!
//! A `Session` owns the uploaded database (connection plus temporary
//! artifact), the cached schema text, and the chat transcript, and
//! sequences the pipeline for each question: synthesize SQL, execute,
//! summarize. Each session's state is exclusively owned; questions are
//! processed one at a time through `&mut self`.

use std::io::Write;

use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info, warn};

use crate::db::{self, DatabaseClient};
use crate::error::{Result, SqlRagError};
use crate::llm::{build_answer_prompt, build_sql_prompt, sanitize_sql, LlmClient};
use crate::query::{execute_to_outcome, QueryOutcome};

/// Role of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A question from the user.
    User,
    /// An answer from the assistant.
    Assistant,
}

impl Role {
    /// Returns the role as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who produced the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An open database with its on-disk artifact.
struct DatabaseHandle {
    client: Box<dyn DatabaseClient>,
    /// Temporary file holding the uploaded bytes. `None` when the session
    /// was built over a pre-opened connection (tests). Deleting the file
    /// on drop is the guaranteed-release path.
    artifact: Option<TempPath>,
}

/// One interactive session: connection, schema text, transcript.
pub struct Session {
    llm: Box<dyn LlmClient>,
    database: Option<DatabaseHandle>,
    schema_text: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl Session {
    /// Creates a new session with no database loaded.
    pub fn new(llm: Box<dyn LlmClient>) -> Self {
        Self {
            llm,
            database: None,
            schema_text: None,
            transcript: Vec::new(),
        }
    }

    /// Creates a session over a pre-opened database client.
    ///
    /// No temporary artifact is managed in this mode. This is primarily
    /// useful for testing.
    pub fn with_database(
        llm: Box<dyn LlmClient>,
        client: Box<dyn DatabaseClient>,
        schema_text: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            database: Some(DatabaseHandle {
                client,
                artifact: None,
            }),
            schema_text: Some(schema_text.into()),
            transcript: Vec::new(),
        }
    }

    /// Returns the cached schema text, if a database is loaded.
    pub fn schema_text(&self) -> Option<&str> {
        self.schema_text.as_deref()
    }

    /// Returns true if a database is currently loaded.
    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }

    /// Returns the ordered chat transcript.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Returns the path of the temporary database artifact, if one is
    /// managed by this session.
    pub fn artifact_path(&self) -> Option<&std::path::Path> {
        self.database
            .as_ref()
            .and_then(|h| h.artifact.as_deref())
    }

    /// Installs an uploaded database, replacing any existing one.
    ///
    /// The previous connection is closed and its artifact deleted before
    /// the new one is installed (failures logged and ignored). The bytes
    /// are persisted to a fresh unique temporary file per upload, so
    /// concurrent sessions cannot clobber each other's databases. On
    /// introspection failure no partial schema is installed and the
    /// session drops back to the no-database state.
    ///
    /// Returns the extracted schema text.
    pub async fn load_database(&mut self, bytes: &[u8]) -> Result<String> {
        self.release_database().await;

        let mut file = NamedTempFile::with_suffix(".db").map_err(|e| {
            SqlRagError::connection(format!("Failed to create temporary database file: {e}"))
        })?;
        file.write_all(bytes).map_err(|e| {
            SqlRagError::connection(format!("Failed to persist uploaded database: {e}"))
        })?;
        let artifact = file.into_temp_path();

        let client = db::open(&artifact).await?;

        let schema = match client.introspect_schema().await {
            Ok(schema) => schema,
            Err(e) => {
                if let Err(close_err) = client.close().await {
                    warn!(error = %close_err, "Failed to close connection after introspection error");
                }
                return Err(e);
            }
        };

        let schema_text = schema.format_for_prompt();
        info!(
            tables = schema.tables.len(),
            "Database uploaded and schema extracted"
        );

        self.database = Some(DatabaseHandle {
            client,
            artifact: Some(artifact),
        });
        self.schema_text = Some(schema_text.clone());

        Ok(schema_text)
    }

    /// Answers one question through the full pipeline.
    ///
    /// Appends the question and the final answer to the transcript. With
    /// no database loaded this fails immediately, before any model call.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let Some(handle) = &self.database else {
            return Err(SqlRagError::query(
                "No database loaded. Upload a SQLite database first.",
            ));
        };
        let schema_text = self
            .schema_text
            .as_deref()
            .ok_or_else(|| SqlRagError::internal("database loaded without schema text"))?;

        self.transcript.push(ChatMessage::user(question));

        // Stage 1: synthesize a SQL query. The cleaned response is a
        // suggestion only; nothing enforces that it is read-only.
        let sql_prompt = build_sql_prompt(schema_text, question);
        let raw_sql = self.llm.generate(&sql_prompt).await?;
        let sql = sanitize_sql(&raw_sql);
        debug!(sql = %sql, "Synthesized SQL");

        // Stage 2: execute. Failures become data, never errors.
        let outcome = execute_to_outcome(handle.client.as_ref(), &sql).await;
        if let QueryOutcome::Failure { error } = &outcome {
            debug!(error = %error, "Execution failed; summarizing the error");
        }

        // Stage 3: summarize the outcome in natural language.
        let answer_prompt = build_answer_prompt(question, &sql, &outcome.render());
        let answer = self.llm.generate(&answer_prompt).await?.trim().to_string();

        self.transcript.push(ChatMessage::assistant(answer.clone()));

        Ok(answer)
    }

    /// Tears down the session: closes the connection and deletes the
    /// temporary artifact. Both operations are best-effort.
    pub async fn teardown(&mut self) {
        self.release_database().await;
    }

    /// Closes and removes the current database, logging and ignoring
    /// cleanup failures.
    async fn release_database(&mut self) {
        if let Some(handle) = self.database.take() {
            if let Err(e) = handle.client.close().await {
                warn!(error = %e, "Failed to close database connection");
            }
            if let Some(artifact) = handle.artifact {
                if let Err(e) = artifact.close() {
                    warn!(error = %e, "Failed to remove temporary database file");
                }
            }
        }
        self.schema_text = None;
    }
}

// If teardown() was never called, dropping the handle still removes the
// temporary file via TempPath's own Drop.
