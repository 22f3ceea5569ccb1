//! Books service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{Book, BookInput, BookOrder},
    repository::{BooksRepository, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BooksRepository>,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self {
            books: repository.books,
        }
    }

    /// All books, ordered by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = self.books.find_many(BookOrder::Title).await?;
        tracing::debug!(count = books.len(), "Listed books");
        Ok(books)
    }

    /// Look up a book; absence is not an error
    pub async fn get(&self, id: &str) -> AppResult<Option<Book>> {
        self.books.find_unique(id).await
    }

    pub async fn create(&self, input: BookInput) -> AppResult<Book> {
        let data = input.into_data()?;
        let book = self.books.create(&data).await?;
        tracing::info!(id = %book.id, "Created book");
        Ok(book)
    }

    /// Overwrite title and author. No existence pre-check: storage reports a missing id.
    pub async fn update(&self, id: &str, input: BookInput) -> AppResult<Book> {
        let data = input.into_data()?;
        let book = self.books.update(id, &data).await?;
        tracing::info!(id = %book.id, "Updated book");
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Book> {
        let book = self.books.delete(id).await?;
        tracing::info!(id = %book.id, "Deleted book");
        Ok(book)
    }

    /// Check storage connectivity (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        self.books.ping().await
    }
}
