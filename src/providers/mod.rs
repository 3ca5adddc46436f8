/*!
 * Provider implementations for the translation backend.
 *
 * This module contains the client implementations the pipeline can talk to:
 * - Hugging Face: hosted inference API serving the translation models
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the chunk translator pipeline.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a request translating `text` with the given backend model
    fn build_request(text: &str, model: &str) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider for a given model
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;

    /// Extract the translated text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod huggingface;
pub mod mock;
