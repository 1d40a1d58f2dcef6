use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for interacting with the Google Gemini API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model identifier, e.g. "gemini-2.5-flash"
    model: String,
}

/// Gemini generateContent request
#[derive(Debug, Default, Serialize)]
pub struct GeminiRequest {
    /// The conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One content turn in a Gemini conversation
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Parts making up the turn
    pub parts: Vec<GeminiPart>,

    /// Role of the turn author ("user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text content
    pub text: String,
}

/// Generation parameters
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    /// Number of prompt tokens
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    /// Number of generated tokens
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// The generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage information
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate in a Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The candidate content
    pub content: Option<GeminiContent>,

    /// Why generation stopped
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GeminiRequest {
    /// Create a new request with a single user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::default().add_text("user", prompt)
    }

    /// Add a text turn to the request
    pub fn add_text(mut self, role: impl Into<String>, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent {
            parts: vec![GeminiPart { text: text.into() }],
            role: Some(role.into()),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        let config = self.generation_config.get_or_insert(GenerationConfig {
            temperature: None,
            max_output_tokens: None,
        });
        config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        let config = self.generation_config.get_or_insert(GenerationConfig {
            temperature: None,
            max_output_tokens: None,
        });
        config.max_output_tokens = Some(max_output_tokens);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, self.model)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    /// Complete a generateContent request
    async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!(
                "Failed to send request to Gemini API: {}", e
            )))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<GeminiResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e))
        })
    }

    /// Test the connection to the Gemini API
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("Hello").max_output_tokens(10);
        self.complete(request).await?;
        Ok(())
    }

    /// Extract text from a Gemini response, concatenating all parts of the
    /// first candidate
    fn extract_text(response: &GeminiResponse) -> String {
        response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
