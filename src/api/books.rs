//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, CreateBook, UpdateBook},
};

use super::ApiJson;

/// Number of books per page when the client does not ask for one
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on the page size a client may request
const MAX_PAGE_SIZE: i64 = 100;
/// Shorter search terms match too broadly
const MIN_SEARCH_LENGTH: usize = 2;

/// Pagination envelope returned by the paginated listing
#[derive(Serialize, ToSchema)]
pub struct PaginatedBooks {
    /// One page of books
    pub data: Vec<Book>,
    /// Total number of books in the store
    pub total: i64,
    /// Current page number (1-based)
    pub page: i64,
    /// Page size after clamping
    pub page_size: i64,
    /// ceil(total / page_size)
    pub total_pages: i64,
}

#[derive(Debug, Deserialize)]
pub struct PaginateParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Parse a path id, rejecting anything but a positive integer
fn parse_id(raw: &str) -> AppResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation_with(
            "Invalid book ID",
            "ID must be a positive integer",
        )),
    }
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Malformed body or empty fields", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiJson(book): ApiJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    if book.title.trim().is_empty() || book.author.trim().is_empty() {
        return Err(AppError::validation(
            "Title and author are required fields",
        ));
    }

    let created = state.services.books.create(&book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_all().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let id = parse_id(&id)?;

    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Update an existing book.
/// Only the fields present in the payload overwrite stored values.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid book ID or body", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UpdateBook>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;

    state.services.books.update(id, &patch).await?;
    Ok(StatusCode::OK)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;

    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete all books
#[utoipa::path(
    delete,
    path = "/books",
    tag = "books",
    responses(
        (status = 204, description = "All books deleted"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_all_books(
    State(state): State<crate::AppState>,
) -> AppResult<StatusCode> {
    state.services.books.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books/paginated",
    tag = "books",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("pageSize" = Option<i64>, Query, description = "Books per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "One page of books", body = PaginatedBooks),
        (status = 400, description = "Invalid page or page size", body = ErrorResponse)
    )
)]
pub async fn list_books_paginated(
    State(state): State<crate::AppState>,
    Query(params): Query<PaginateParams>,
) -> AppResult<Json<PaginatedBooks>> {
    let page = match params.page.as_deref() {
        None => 1,
        Some(raw) => match raw.parse::<i64>() {
            Ok(page) if page >= 1 => page,
            _ => {
                return Err(AppError::validation_with(
                    "Invalid page number",
                    "Page must be a positive integer",
                ))
            }
        },
    };

    let mut page_size = match params.page_size.as_deref() {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => match raw.parse::<i64>() {
            Ok(size) if size >= 1 => size,
            _ => {
                return Err(AppError::validation_with(
                    "Invalid page size",
                    "PageSize must be a positive integer",
                ))
            }
        },
    };

    // Limit maximum page size
    if page_size > MAX_PAGE_SIZE {
        page_size = MAX_PAGE_SIZE;
    }

    let (books, total) = state.services.books.paginate(page, page_size).await?;

    Ok(Json(PaginatedBooks {
        data: books,
        total,
        page,
        page_size,
        total_pages: (total + page_size - 1) / page_size,
    }))
}

/// Search books by title or author
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(
        ("q" = String, Query, description = "Search term, at least 2 characters")
    ),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Invalid search query", body = ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Book>>> {
    let query = params.q.as_deref().unwrap_or("").trim().to_string();

    if query.is_empty() {
        return Err(AppError::validation("Search query cannot be empty"));
    }

    if query.chars().count() < MIN_SEARCH_LENGTH {
        return Err(AppError::validation(
            "Search query must be at least 2 characters long",
        ));
    }

    let books = state.services.books.search(&query).await?;
    Ok(Json(books))
}
