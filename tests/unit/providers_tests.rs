/*!
 * Tests for provider implementations
 */

use reqwest::StatusCode;
use pdflingo::errors::ProviderError;
use pdflingo::providers::huggingface::HuggingFace;
use pdflingo::providers::mock::MockProvider;
use pdflingo::providers::Provider;

#[test]
fn test_parseBody_withTranslations_shouldJoinOutputs() {
    let body = r#"[{"translation_text":"Bonjour."},{"translation_text":"Au revoir."}]"#;
    let response = HuggingFace::parse_body(StatusCode::OK, body).unwrap();
    assert_eq!(HuggingFace::extract_text(&response), "Bonjour. Au revoir.");
}

#[test]
fn test_parseBody_withEmptyArray_shouldFail() {
    let result = HuggingFace::parse_body(StatusCode::OK, "[]");
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_parseBody_withGarbage_shouldFail() {
    let result = HuggingFace::parse_body(StatusCode::OK, "<html>oops</html>");
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_parseBody_withErrorStatuses_shouldMapKinds() {
    let result = HuggingFace::parse_body(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid token"}"#);
    assert!(matches!(result, Err(ProviderError::AuthenticationError(ref m)) if m == "Invalid token"));

    let result = HuggingFace::parse_body(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"Rate limit reached"}"#);
    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));

    let result = HuggingFace::parse_body(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":"Model is currently loading","estimated_time":20.0}"#,
    );
    match result {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 503);
            assert!(message.contains("loading"));
            assert!(message.contains("20s"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_buildRequest_shouldCarryModel() {
    let request = HuggingFace::build_request("Hello.", "Helsinki-NLP/opus-mt-en-de");
    assert_eq!(request.model, "Helsinki-NLP/opus-mt-en-de");
    assert_eq!(request.inputs, "Hello.");
}

#[tokio::test]
async fn test_mockProvider_failOn_shouldOnlyFailThatRequest() {
    let provider = MockProvider::fail_on(2);
    assert!(provider.complete(MockProvider::build_request("a", "m")).await.is_ok());
    assert!(provider.complete(MockProvider::build_request("b", "m")).await.is_err());
    assert!(provider.complete(MockProvider::build_request("c", "m")).await.is_ok());
    assert_eq!(provider.request_count(), 3);
}

#[tokio::test]
async fn test_mockProvider_clone_shouldShareRequestLog() {
    let provider = MockProvider::working();
    let clone = provider.clone();
    clone.test_connection("model-x").await.unwrap();

    assert_eq!(provider.request_count(), 1);
    assert_eq!(provider.requests()[0].model, "model-x");
}
