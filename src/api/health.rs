//! Root and health check endpoints

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Service description listing the available routes
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service and route description")
    )
)]
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Book API",
        "routes": {
            "GET /api/books": "List all books",
            "GET /api/books/:id": "Get a book",
            "GET /api/books/paginated": "List books with pagination",
            "GET /api/books/search": "Search books by title or author",
            "POST /api/books": "Create a book",
            "PUT /api/books/:id": "Update a book",
            "DELETE /api/books/:id": "Delete a book",
            "DELETE /api/books": "Delete all books"
        }
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
