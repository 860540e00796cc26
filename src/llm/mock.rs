//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns, plus a call
//! counter so tests can assert how many model round-trips were made.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::Result;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses.
///
/// Responses can be scripted as a queue (consumed in order) or as
/// pattern/response pairs matched against the prompt. Used for unit and
/// integration testing without making real API calls.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    /// Scripted responses consumed in order, checked before patterns.
    queued_responses: Mutex<VecDeque<String>>,
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
    /// Number of generate() calls made.
    call_count: AtomicUsize,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response to be returned by the next unmatched call.
    pub fn with_queued_response(self, response: impl Into<String>) -> Self {
        self.queued_responses
            .lock()
            .expect("queue lock poisoned")
            .push_back(response.into());
        self
    }

    /// Adds a custom response mapping.
    ///
    /// When the prompt contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Returns the number of generate() calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Generates a mock response based on the prompt.
    fn mock_response(&self, prompt: &str) -> String {
        if let Some(queued) = self
            .queued_responses
            .lock()
            .expect("queue lock poisoned")
            .pop_front()
        {
            return queued;
        }

        let prompt_lower = prompt.to_lowercase();

        for (pattern, response) in &self.custom_responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Default behavior: SQL generation prompts get a count query,
        // summarization prompts get a short sentence.
        if prompt_lower.contains("sql query generator") {
            return "```sql\nSELECT COUNT(*) FROM users;\n```".to_string();
        }

        if prompt_lower.contains("summarize the results") {
            return "The query returned the requested data.".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.mock_response(prompt))
    }
}
