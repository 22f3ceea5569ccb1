//! Repository layer for database operations

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookData, BookOrder},
};

/// CRUD access to the `books` relation.
///
/// `update` and `delete` fail with `AppError::NotFound` when no row has the id;
/// `find_unique` reports absence as `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn find_many(&self, order: BookOrder) -> AppResult<Vec<Book>>;
    async fn find_unique(&self, id: &str) -> AppResult<Option<Book>>;
    async fn create(&self, data: &BookData) -> AppResult<Book>;
    async fn update(&self, id: &str, data: &BookData) -> AppResult<Book>;
    async fn delete(&self, id: &str) -> AppResult<Book>;
    /// Check that storage answers
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage backends
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool)),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(memory::MemoryBooksRepository::new()),
        }
    }

    pub fn with_books(books: Arc<dyn BooksRepository>) -> Self {
        Self { books }
    }
}
