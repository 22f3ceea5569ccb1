//! In-process books repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookData, BookOrder},
};

/// Keeps books in a map guarded by a lock. Ordering matches the Postgres
/// repository: byte-wise on the order column, then by id.
#[derive(Default)]
pub struct MemoryBooksRepository {
    books: RwLock<HashMap<String, Book>>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BooksRepository for MemoryBooksRepository {
    async fn find_many(&self, order: BookOrder) -> AppResult<Vec<Book>> {
        let mut rows: Vec<Book> = self.books.read().await.values().cloned().collect();
        rows.sort_by(|a, b| {
            order
                .key(a)
                .cmp(order.key(b))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn find_unique(&self, id: &str) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(id).cloned())
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: data.title.clone(),
            author: data.author.clone(),
        };
        self.books.write().await.insert(book.id.clone(), book.clone());
        Ok(book)
    }

    async fn update(&self, id: &str, data: &BookData) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        book.title = data.title.clone();
        book.author = data.author.clone();
        Ok(book.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<Book> {
        self.books
            .write()
            .await
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
