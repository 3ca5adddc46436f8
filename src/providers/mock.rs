/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::fail_on(n)` - Fails on the nth request only
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::slow(ms)` - Succeeds after a delay
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Backend model the request was built for
    pub model: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation
    Working,
    /// Fails on the request with this one-based number, succeeds otherwise
    FailOn { request_number: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds after sleeping
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider that fails on the nth request (one-based)
    pub fn fail_on(request_number: usize) -> Self {
        Self::new(MockBehavior::FailOn { request_number })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock provider that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &MockRequest) -> MockResponse {
        let text = match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.model, request.text),
        };
        MockResponse { text }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn build_request(text: &str, model: &str) -> Self::Request {
        MockRequest {
            text: text.to_string(),
            model: model.to_string(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(request.clone());

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(&request)),

            MockBehavior::FailOn { request_number } => {
                if count == request_number {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated failure (request #{})", count),
                        status_code: 503,
                    })
                } else {
                    Ok(self.respond(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.respond(&request))
            }
        }
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        self.complete(Self::build_request("Hello.", model)).await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
