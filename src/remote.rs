use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::error::GenieError;
use crate::generator::{decode_recipe, RecipeSource};
use crate::model::Recipe;
use crate::relay::{ErrorResponse, MISSING_KEY_MESSAGE};

/// Generates recipes through a relay server instead of calling the model directly.
///
/// The relay holds the model credential, so a client using this source needs none.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        RelayClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl RecipeSource for RelayClient {
    async fn generate(&self, ingredients: &str) -> Result<Recipe, GenieError> {
        if ingredients.trim().is_empty() {
            return Err(GenieError::EmptyInput);
        }

        info!("Requesting recipe from relay {}", self.base_url);
        let response = self
            .client
            .post(self.endpoint())
            .json(&json!({ "ingredients": ingredients }))
            .send()
            .await
            .map_err(|e| {
                error!("Error reaching relay: {}", e);
                GenieError::Generation
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Error reading relay response: {}", e);
            GenieError::Generation
        })?;

        match status {
            StatusCode::OK => decode_recipe(&body),
            StatusCode::BAD_REQUEST => {
                warn!("Relay rejected ingredients: {}", body);
                Err(GenieError::EmptyInput)
            }
            StatusCode::INTERNAL_SERVER_ERROR if is_missing_key(&body) => {
                error!("Relay has no model credential configured");
                Err(GenieError::Configuration)
            }
            _ => {
                error!("Relay failed ({}): {}", status, body);
                Err(GenieError::Generation)
            }
        }
    }
}

/// Whether a relay error body reports the missing model credential
fn is_missing_key(body: &str) -> bool {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|response| response.error == MISSING_KEY_MESSAGE)
        .unwrap_or(false)
}
