//! Mock inference backend for deterministic testing.
//!
//! Returns pre-queued responses without any network access and records every
//! prompt it receives, so tests can assert on the rendered prompt and on the
//! number of backend calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use skillrun_core::{Result, SkillError};

use crate::backend::InferenceBackend;

enum MockResponse {
    Text(String),
    Error(String),
}

/// A mock backend with a queue of canned responses.
///
/// # Example
/// ```
/// use skillrun_backend::MockBackend;
/// let backend = MockBackend::new().with_response("Hello, world!");
/// ```
pub struct MockBackend {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a text response.
    pub fn with_response(self, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Text(text.to_string()));
        self
    }

    /// Queue a backend failure.
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(message.to_string()));
        self
    }

    /// Handle to the prompts received so far, for test assertions.
    pub fn recorded_prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn infer(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Error(message)) => Err(SkillError::Backend(message)),
            None => Ok("(mock: no queued response)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_come_back_in_order() {
        let backend = MockBackend::new().with_response("one").with_response("two");
        assert_eq!(backend.infer("a").await.unwrap(), "one");
        assert_eq!(backend.infer("b").await.unwrap(), "two");
    }

    #[tokio::test]
    async fn records_prompts() {
        let backend = MockBackend::new().with_response("ok");
        let prompts = backend.recorded_prompts();
        backend.infer("rendered prompt").await.unwrap();
        assert_eq!(*prompts.lock().unwrap(), vec!["rendered prompt"]);
    }

    #[tokio::test]
    async fn queued_error_surfaces_as_backend_failure() {
        let backend = MockBackend::new().with_error("rate limited");
        let err = backend.infer("x").await.unwrap_err();
        assert!(matches!(err, SkillError::Backend(msg) if msg == "rate limited"));
    }
}
