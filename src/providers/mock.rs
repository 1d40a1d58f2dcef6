/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working(text)` - Always succeeds with a canned response
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds with an empty response
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The prompt text
    pub prompt: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The canned response text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the canned text
    Working(String),
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing highlight discovery behavior
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    call_count: AtomicUsize,
}

impl MockProvider {
    /// A provider that always returns the given text
    pub fn working(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Working(text.into()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// A provider that always fails
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Failing,
            call_count: AtomicUsize::new(0),
        }
    }

    /// A provider that returns an empty response
    pub fn empty() -> Self {
        Self {
            behavior: MockBehavior::Empty,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Number of completed calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, _request: MockRequest) -> Result<MockResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Working(text) => Ok(MockResponse { text: text.clone() }),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Empty => Ok(MockResponse {
                text: String::new(),
            }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
