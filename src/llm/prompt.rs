//! Prompt construction for the two LLM round-trips.
//!
//! The pipeline makes two calls per question: one to synthesize a SQL
//! query from the schema, and one to summarize the execution outcome.
//! Both prompts are fixed templates with values interpolated.

/// Marker the model is instructed to emit when a question cannot be
/// answered from the schema.
pub const INVALID_QUERY_MARKER: &str = "Invalid query";

/// SQL generation prompt template.
const SQL_PROMPT_TEMPLATE: &str = r#"You are an expert SQL query generator. Given the following database schema:
{schema}

Generate a valid SELECT SQL query to answer the user's question: "{question}"
Only generate SELECT queries for safety. Output only the SQL query, nothing else.
If the question can't be answered with the schema, output "Invalid query"."#;

/// Answer summarization prompt template.
const ANSWER_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant. Given the user's question: "{question}"
SQL query generated: {sql}
Query results: {results}

Summarize the results in natural language. Be concise and directly answer the question.
If there was an error or no results, explain politely."#;

/// Builds the SQL synthesis prompt from the schema text and the question.
///
/// The question is embedded verbatim; the schema text is the one-line-per-table
/// rendering from [`crate::db::Schema::format_for_prompt`].
pub fn build_sql_prompt(schema_text: &str, question: &str) -> String {
    SQL_PROMPT_TEMPLATE
        .replace("{schema}", schema_text)
        .replace("{question}", question)
}

/// Builds the answer summarization prompt from the question, the generated
/// SQL, and the rendered execution outcome.
pub fn build_answer_prompt(question: &str, sql: &str, rendered_outcome: &str) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{sql}", sql)
        .replace("{results}", rendered_outcome)
}
