//! HTTP contract tests driving the full router in-process.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use book_api::{api, config::AppConfig, repository::Repository, services::Services, AppState};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let repository = Repository::new(pool);
    repository
        .init_schema()
        .await
        .expect("Failed to create schema");

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(repository)),
    };

    api::create_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response body")
    };

    (status, json)
}

#[tokio::test]
async fn book_lifecycle_create_get_delete() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "Book 1", "author": "Author 1", "year": 2000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("No id in response");
    assert!(id > 0);
    assert_eq!(created["title"], "Book 1");
    assert_eq!(created["author"], "Author 1");
    assert_eq!(created["year"], 2000);

    let (status, fetched) = send(&app, "GET", &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, "DELETE", &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "   ", "author": "Author", "year": 2000})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and author are required fields");
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let app = test_app().await;

    // Valid JSON of the wrong shape
    let (status, body) = send(&app, "POST", "/api/books", Some(json!("not a book"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn create_defaults_missing_year_to_zero() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "No Year", "author": "Author"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["year"], 0);
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_rejects_bad_ids() {
    let app = test_app().await;

    for uri in ["/api/books/0", "/api/books/-1", "/api/books/abc"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["error"], "Invalid book ID");
        assert_eq!(body["details"], "ID must be a positive integer");
    }
}

#[tokio::test]
async fn update_merges_partial_payload() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "Old", "author": "Author", "year": 1999})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/books/{}", id),
        Some(json!({"title": "New"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, fetched) = send(&app, "GET", &format!("/api/books/{}", id), None).await;
    assert_eq!(fetched["title"], "New");
    assert_eq!(fetched["author"], "Author");
    assert_eq!(fetched["year"], 1999);
}

#[tokio::test]
async fn update_missing_book_returns_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, "PUT", "/api/books/42", Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_book_returns_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, "DELETE", "/api/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_all_empties_the_collection() {
    let app = test_app().await;

    for i in 0..3 {
        send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"title": format!("Book {}", i), "author": "Author", "year": 2000})),
        )
        .await;
    }

    let (status, _) = send(&app, "DELETE", "/api/books", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/books", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn pagination_envelope_matches_totals() {
    let app = test_app().await;

    for i in 0..3 {
        send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"title": format!("Book {}", i), "author": "Author", "year": 2000})),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/api/books/paginated?page=1&pageSize=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 2);
    assert_eq!(body["total_pages"], 2);
}

#[tokio::test]
async fn pagination_uses_defaults_when_params_absent() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/books/paginated", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn pagination_clamps_page_size_to_maximum() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/books/paginated?page=1&pageSize=200",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_size"], 100);
}

#[tokio::test]
async fn pagination_rejects_invalid_params() {
    let app = test_app().await;

    for uri in [
        "/api/books/paginated?page=0",
        "/api/books/paginated?page=abc",
        "/api/books/paginated?pageSize=0",
        "/api/books/paginated?pageSize=abc",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn search_finds_books_by_title() {
    let app = test_app().await;

    send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"title": "Test Book", "author": "Author", "year": 2000})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/books/search?q=Test", None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["title"], "Test Book");
}

#[tokio::test]
async fn search_rejects_short_and_blank_queries() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/books/search?q=T", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Search query must be at least 2 characters long"
    );

    let (status, body) = send(&app, "GET", "/api/books/search?q=%20%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query cannot be empty");

    let (status, _) = send(&app, "GET", "/api/books/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_route_describes_the_service() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Book API");
    assert!(body["routes"].is_object());
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
