//! # General Route Handlers
//!
//! The root, health check, and hello-world liveness endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "profilescout server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `/hello_world` liveness probe.
pub async fn hello_world() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, world!".to_string(),
    })
}
