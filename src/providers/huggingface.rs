use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Hugging Face client for the hosted inference API
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// API token for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
}

impl std::fmt::Debug for HuggingFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFace")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Translation request for one chunk
#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequest {
    /// Model the request is routed to, not part of the body
    #[serde(skip)]
    pub model: String,

    /// Source text
    pub inputs: String,
}

/// Single translation in a successful response
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationOutput {
    /// The translated text
    pub translation_text: String,
}

/// Translation response
#[derive(Debug, Clone)]
pub struct TranslationResponse {
    /// One output per input, the API sends exactly one for a string input
    pub outputs: Vec<TranslationOutput>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// Any body the API can answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiBody {
    Outputs(Vec<TranslationOutput>),
    Error(ApiErrorBody),
}

impl TranslationRequest {
    /// Create a new translation request
    pub fn new(model: impl Into<String>, inputs: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            inputs: inputs.into(),
        }
    }
}

impl HuggingFace {
    /// Create a new Hugging Face client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// URL of the inference route for a model
    pub fn model_url(&self, model: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api-inference.huggingface.co"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/models/{}", base, model)
    }

    /// Parse a response body into translations, mapping API error bodies
    pub fn parse_body(status: StatusCode, body: &str) -> Result<TranslationResponse, ProviderError> {
        let parsed = serde_json::from_str::<ApiBody>(body);

        if !status.is_success() {
            let message = match parsed {
                Ok(ApiBody::Error(err)) => match err.estimated_time {
                    Some(secs) => format!("{} (estimated time {:.0}s)", err.error, secs),
                    None => err.error,
                },
                _ => body.to_string(),
            };
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message,
                },
            });
        }

        match parsed {
            Ok(ApiBody::Outputs(outputs)) if !outputs.is_empty() => Ok(TranslationResponse { outputs }),
            Ok(ApiBody::Outputs(_)) => Err(ProviderError::ParseError("Response contained no translation".to_string())),
            Ok(ApiBody::Error(err)) => Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: err.error,
            }),
            Err(e) => Err(ProviderError::ParseError(e.to_string())),
        }
    }
}

#[async_trait]
impl Provider for HuggingFace {
    type Request = TranslationRequest;
    type Response = TranslationResponse;

    fn build_request(text: &str, model: &str) -> Self::Request {
        TranslationRequest::new(model, text)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let api_url = self.model_url(&request.model);
        debug!("POST {} ({} chars)", api_url, request.inputs.chars().count());

        let response = self.client.post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Hugging Face API error ({}): {}", status, body);
        }

        Self::parse_body(status, &body)
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        let request = Self::build_request("Hello.", model);
        self.complete(request).await?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.outputs.iter()
            .map(|output| output.translation_text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
