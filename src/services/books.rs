//! Book management service
//!
//! A thin layer between the handlers and the repository; each call
//! forwards to a single data-access operation.

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        self.repository.books.create(book).await
    }

    /// Get all books
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.get_all().await
    }

    /// Get a book by id
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Merge a partial update into an existing book
    pub async fn update(&self, id: i64, patch: &UpdateBook) -> AppResult<Book> {
        self.repository.books.update(id, patch).await
    }

    /// Delete a book by id
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Delete all books
    pub async fn delete_all(&self) -> AppResult<()> {
        self.repository.books.delete_all().await
    }

    /// Get one page of books plus the total count
    pub async fn paginate(&self, page: i64, page_size: i64) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.paginate(page, page_size).await
    }

    /// Search books by title or author substring
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }
}
