//! The companion support-chat HTTP endpoint.
//!
//! A stateless echo service kept as an interface contract: the classifier
//! behind the evaluation harness could later be substituted into this
//! endpoint, but today no model is involved.

use axum::{http::StatusCode, routing::post, Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

/// Reply sent when the request carries no message.
pub const DEFAULT_PROMPT: &str = "I'm here to help you. How are you feeling today?";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

async fn chat(Json(request): Json<ChatRequest>) -> (StatusCode, Json<ChatResponse>) {
    match request.message.as_deref().filter(|message| !message.is_empty()) {
        Some(message) => (
            StatusCode::OK,
            Json(ChatResponse {
                reply: format!("You said: '{}'. I'm here to support you.", message),
            }),
        ),
        None => (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                reply: DEFAULT_PROMPT.to_string(),
            }),
        ),
    }
}

/// Builds the chat router with CORS enabled for all routes.
pub fn routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().route("/chat", post(chat)).layer(cors)
}

/// Binds and serves the chat endpoint until the process is stopped.
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes()).await?;
    Ok(())
}
