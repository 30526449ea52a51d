use async_trait::async_trait;
use log::{debug, error, info};
use serde_json::Value;
use std::sync::Arc;

use crate::config::GenieConfig;
use crate::error::GenieError;
use crate::model::Recipe;
use crate::providers::{
    inject_ingredients, GenerationRequest, GoogleProvider, LlmProvider, TEMPERATURE,
};
use crate::schema::recipe_schema;

/// Anything that can turn an ingredients list into a recipe.
///
/// This is the only contract the [`crate::Controller`] depends on.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn generate(&self, ingredients: &str) -> Result<Recipe, GenieError>;
}

/// Builds the prompt, calls the model once and validates what comes back.
///
/// Holds no state between calls: identical inputs always trigger a fresh request.
#[derive(Clone)]
pub struct RecipeGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        RecipeGenerator { provider }
    }

    /// Create a generator backed by Google Gemini.
    ///
    /// Fails fast with [`GenieError::Configuration`] if the API key is missing.
    pub fn from_config(config: &GenieConfig) -> Result<Self, GenieError> {
        let provider = GoogleProvider::new(&config.provider)?;
        Ok(Self::new(Arc::new(provider)))
    }
}

#[async_trait]
impl RecipeSource for RecipeGenerator {
    async fn generate(&self, ingredients: &str) -> Result<Recipe, GenieError> {
        if ingredients.trim().is_empty() {
            return Err(GenieError::EmptyInput);
        }

        let request = GenerationRequest {
            prompt: inject_ingredients(ingredients),
            schema: recipe_schema(),
            temperature: TEMPERATURE,
        };

        info!("Requesting recipe from {}", self.provider.provider_name());
        let text = self.provider.generate(&request).await.map_err(|e| {
            error!("Error generating recipe: {}", e);
            GenieError::Generation
        })?;

        let recipe = decode_recipe(&text)?;
        info!("Generated recipe '{}'", recipe.name);
        Ok(recipe)
    }
}

/// Decode a model response into a complete [`Recipe`].
///
/// Text that is not JSON is a generation failure. JSON that does not describe a
/// complete recipe is a validation failure.
pub fn decode_recipe(text: &str) -> Result<Recipe, GenieError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| {
        error!("Error generating recipe: response is not JSON: {}", e);
        debug!("Raw response: {}", text);
        GenieError::Generation
    })?;

    let recipe: Recipe = serde_json::from_value(value).map_err(|e| {
        error!("Invalid recipe format: {}", e);
        GenieError::Validation
    })?;

    recipe.validate().map_err(|reason| {
        error!("Invalid recipe format: {}", reason);
        GenieError::Validation
    })?;

    Ok(recipe)
}
