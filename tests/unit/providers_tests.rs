/*!
 * Tests for provider implementations
 */

use clipchop::errors::ProviderError;
use clipchop::providers::Provider;
use clipchop::providers::gemini::{Gemini, GeminiRequest, GeminiResponse};
use clipchop::providers::mock::{MockProvider, MockRequest};

/// Test the builder pattern functions for GeminiRequest
#[test]
fn test_gemini_request_builder_shouldSerializeAllFields() {
    let request = GeminiRequest::new("Find the highlights")
        .temperature(0.5)
        .max_output_tokens(1024);

    let json = serde_json::to_string(&request).expect("Failed to serialize request");

    assert!(json.contains(r#""text":"Find the highlights""#));
    assert!(json.contains(r#""role":"user""#));
    assert!(json.contains(r#""temperature":0.5"#));
    assert!(json.contains(r#""maxOutputTokens":1024"#));
    assert!(json.contains(r#""generationConfig""#));
}

/// Test that an unconfigured generation config is omitted from the payload
#[test]
fn test_gemini_request_withoutGenerationConfig_shouldOmitIt() {
    let request = GeminiRequest::new("Hello");
    let json = serde_json::to_string(&request).expect("Failed to serialize request");
    assert!(!json.contains("generationConfig"));
}

/// Test that a default request is empty with no generation config
#[test]
fn test_gemini_request_default_shouldBeEmpty() {
    let json = serde_json::to_string(&GeminiRequest::default()).expect("Failed to serialize");
    assert_eq!(json, r#"{"contents":[]}"#);
}

/// Test extracting text from a Gemini response
#[test]
fn test_gemini_extract_text_shouldConcatenateFirstCandidateParts() {
    let raw = r#"{
        "candidates": [
            {
                "content": {
                    "parts": [
                        {"text": "[00:00:10,000] → [00:00:22,000]\n"},
                        {"text": "Reason: Funny reaction."}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }
        ],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
    }"#;

    let response: GeminiResponse = serde_json::from_str(raw).expect("Failed to parse response");
    let text = Gemini::extract_text(&response);

    assert_eq!(text, "[00:00:10,000] → [00:00:22,000]\nReason: Funny reaction.");
    assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
}

/// Test that an empty candidates array extracts to an empty string
#[test]
fn test_gemini_extract_text_withNoCandidates_shouldReturnEmpty() {
    let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
    assert_eq!(Gemini::extract_text(&response), "");
}

/// Test the working mock provider
#[tokio::test]
async fn test_mock_provider_working_shouldReturnCannedText() {
    let provider = MockProvider::working("canned response");

    let response = provider
        .complete(MockRequest {
            prompt: "anything".to_string(),
        })
        .await
        .expect("working mock should succeed");

    assert_eq!(MockProvider::extract_text(&response), "canned response");
    assert_eq!(provider.call_count(), 1);
}

/// Test the failing mock provider
#[tokio::test]
async fn test_mock_provider_failing_shouldReturnError() {
    let provider = MockProvider::failing();

    let result = provider
        .complete(MockRequest {
            prompt: "anything".to_string(),
        })
        .await;

    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    assert!(provider.test_connection().await.is_err());
}
