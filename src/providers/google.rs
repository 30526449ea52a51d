use crate::config::ProviderConfig;
use crate::error::{GenieError, ProviderError};
use crate::providers::{GenerationRequest, LlmProvider};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration.
    ///
    /// Fails with [`GenieError::Configuration`] when no API key is available,
    /// before any request is attempted.
    pub fn new(config: &ProviderConfig) -> Result<Self, GenieError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            error!("API_KEY not found in config or environment");
            GenieError::Configuration
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            GenieError::Configuration
        })?;

        Ok(GoogleProvider {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": request.prompt
                    }]
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": request.schema,
                    "temperature": request.temperature
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("Google Gemini response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_code = error["code"].as_u64().unwrap_or(status.as_u16() as u64);
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(ProviderError::Api {
                status: error_code as u16,
                message: error_message.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: response_body.to_string(),
            });
        }

        if let Some(reason) = response_body["promptFeedback"]["blockReason"].as_str() {
            return Err(ProviderError::MissingContent(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let parts = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                let finish_reason = response_body["candidates"][0]["finishReason"]
                    .as_str()
                    .unwrap_or("unknown");
                ProviderError::MissingContent(format!("finish reason: {}", finish_reason))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::MissingContent(
                "candidate has no text parts".to_string(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::recipe_schema;
    use mockito::{Matcher, Server};

    fn test_config(base_url: String) -> ProviderConfig {
        ProviderConfig {
            model: "gemini-2.5-flash".to_string(),
            api_key: Some("test-key".to_string()),
            base_url: Some(base_url),
            timeout: None,
        }
    }

    fn test_request() -> GenerationRequest<'static> {
        GenerationRequest {
            prompt: "Ingredientes: ovos".to_string(),
            schema: recipe_schema(),
            temperature: 0.7,
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = GoogleProvider::new(&test_config(DEFAULT_BASE_URL.to_string())).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_missing_key_hides_details() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("API_KEY");
        let mut config = test_config(DEFAULT_BASE_URL.to_string());
        config.api_key = None;

        match GoogleProvider::new(&config) {
            Err(e) => {
                assert!(e.is_configuration());
                assert!(!e.to_string().contains("API_KEY"));
            }
            Ok(_) => panic!("Expected a configuration error"),
        }
    }

    #[test]
    fn test_endpoint_uses_model() {
        let provider =
            GoogleProvider::new(&test_config("http://localhost:1234/".to_string())).unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_sends_schema_and_temperature() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "temperature": 0.7,
                    "responseSchema": { "type": "OBJECT" }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"parts": [{"text": "{\"recipeName\": \"Omelete\"}"}]},
                        "finishReason": "STOP"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(server.url())).unwrap();
        let text = provider.generate(&test_request()).await.unwrap();

        assert_eq!(text, r#"{"recipeName": "Omelete"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 400, "message": "API key not valid"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(server.url())).unwrap();
        let result = provider.generate(&test_request()).await;

        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("API key not valid"));
            }
            other => panic!("Expected API error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(server.url())).unwrap();
        let result = provider.generate(&test_request()).await;

        assert!(matches!(result, Err(ProviderError::MissingContent(_))));
    }

    #[tokio::test]
    async fn test_generate_non_json_error_page() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let provider = GoogleProvider::new(&test_config(server.url())).unwrap();
        let result = provider.generate(&test_request()).await;

        assert!(matches!(result, Err(ProviderError::Http(_))));
    }
}
