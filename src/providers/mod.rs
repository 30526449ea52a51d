mod google;
mod prompt;

pub use google::GoogleProvider;
pub use prompt::{inject_ingredients, RECIPE_PROMPT};

use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::Value;

/// Sampling temperature used for every recipe request
pub const TEMPERATURE: f64 = 0.7;

/// One structured-output request to a generative model
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// Full natural-language prompt
    pub prompt: String,
    /// Schema the response text must conform to
    pub schema: &'a Value,
    pub temperature: f64,
}

/// Unified trait for generative model backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Send a single request and return the raw response text
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError>;
}
