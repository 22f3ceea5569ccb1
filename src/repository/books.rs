//! Postgres-backed books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookData, BookOrder},
};

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// `ORDER BY` clause for a book list; byte-wise collation, ties broken by id
fn order_clause(order: BookOrder) -> String {
    format!("{} COLLATE \"C\" ASC, id COLLATE \"C\" ASC", order.column())
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn find_many(&self, order: BookOrder) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT id, title, author FROM books ORDER BY {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_unique(&self, id: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, author
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&data.title)
        .bind(&data.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: &str, data: &BookData) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, author = $3
            WHERE id = $1
            RETURNING id, title, author
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn delete(&self, id: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("DELETE FROM books WHERE id = $1 RETURNING id, title, author")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
