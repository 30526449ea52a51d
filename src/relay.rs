//! HTTP relay that keeps the model credential on the server.
//!
//! Exposes a single `POST /api/generate` endpoint taking `{"ingredients": "..."}`
//! and answering with the recipe JSON or an `{"error": "..."}` object.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::GenieError;
use crate::generator::RecipeSource;

pub const MISSING_KEY_MESSAGE: &str = "A chave da API não está configurada no servidor.";
pub const MISSING_INGREDIENTS_MESSAGE: &str = "Os ingredientes são necessários.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    ingredients: String,
}

/// Shared relay state.
///
/// `generator` is `None` when the server started without a model credential;
/// every generation request is then answered with a configuration error.
#[derive(Clone)]
pub struct RelayState {
    generator: Option<Arc<dyn RecipeSource>>,
}

/// Build the relay router
pub fn router(generator: Option<Arc<dyn RecipeSource>>) -> Router {
    let state = Arc::new(RelayState { generator });

    Router::new()
        .route("/api/generate", post(generate).fallback(method_not_allowed))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind `addr` and serve the relay until Ctrl-C is received
pub async fn serve(addr: &str, generator: Option<Arc<dyn RecipeSource>>) -> std::io::Result<()> {
    if generator.is_none() {
        warn!("No model credential configured; /api/generate will answer with 500");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Relay listening on {}", listener.local_addr()?);

    axum::serve(listener, router(generator))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down relay");
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

/// Extract a non-blank `ingredients` string from a JSON body
fn parse_ingredients(body: &[u8]) -> Option<String> {
    let request: GenerateRequest = serde_json::from_slice(body).ok()?;
    Some(request.ingredients).filter(|ingredients| !ingredients.trim().is_empty())
}

async fn generate(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    let Some(generator) = state.generator.as_ref() else {
        error!("Generation requested but no model credential is configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE);
    };

    let Some(ingredients) = parse_ingredients(&body) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_INGREDIENTS_MESSAGE);
    };

    match generator.generate(&ingredients).await {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(GenieError::EmptyInput) => {
            error_response(StatusCode::BAD_REQUEST, MISSING_INGREDIENTS_MESSAGE)
        }
        Err(e) if e.is_configuration() => {
            error!("Relay configuration error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE)
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
