//! Response post-processing for LLM outputs.
//!
//! The model is asked to output bare SQL, but in practice often wraps it in
//! markdown code fences. This module strips that markup so the executor
//! receives a plain statement.

/// Cleans a raw LLM response into a plain SQL statement.
///
/// Removes markdown code-fence markers (with or without a `sql` language
/// tag) and trims surrounding whitespace. The result is still unverified
/// text; nothing here guarantees the statement is valid or read-only.
pub fn sanitize_sql(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    // Strip a language tag attached to an opening fence before removing
    // the fences themselves, so "```sqlite" does not leave "ite" behind.
    for tag in ["```sql", "```sqlite", "```SQL"] {
        text = text.replace(tag, "");
    }
    text = text.replace("```", "");

    text.trim().to_string()
}
