//! Books repository for database operations.
//!
//! Every operation is a single-table query against the `books` store.

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, title, author, year";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Insert a new book and return the stored record with its assigned id
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO books (title, author, year) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Get every book, in insertion order
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get a book by id
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ?",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Get one page of books plus the total row count.
    /// `page` is 1-based; the offset is `(page - 1) * page_size`.
    pub async fn paginate(&self, page: i64, page_size: i64) -> AppResult<(Vec<Book>, i64)> {
        let offset = (page - 1).saturating_mul(page_size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id LIMIT ? OFFSET ?",
            BOOK_COLUMNS
        ))
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Search books whose title or author contains `query` as a substring
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", query);

        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE title LIKE ? OR author LIKE ? ORDER BY id",
            BOOK_COLUMNS
        ))
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Merge the present fields of `patch` into an existing book.
    /// Fields absent from the patch keep their stored value.
    pub async fn update(&self, id: i64, patch: &UpdateBook) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = COALESCE(?, title),
                author = COALESCE(?, author),
                year = COALESCE(?, year)
            WHERE id = ?
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.author.as_deref())
        .bind(patch.year)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        self.get_by_id(id).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book by id
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        Ok(())
    }

    /// Delete every book unconditionally
    pub async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;

        Ok(())
    }
}
