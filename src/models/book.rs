//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Message returned whenever a title or author is missing
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and author are required";

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Identifier assigned by storage at creation
    pub id: String,
    pub title: String,
    pub author: String,
}

/// Create / update book request.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(required, length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Validated fields written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub title: String,
    pub author: String,
}

/// Order of a book list: byte-wise ascending on a column, ties broken by id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookOrder {
    #[default]
    Title,
}

impl BookOrder {
    pub fn column(&self) -> &'static str {
        match self {
            BookOrder::Title => "title",
        }
    }

    pub fn key<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookOrder::Title => &book.title,
        }
    }
}

impl BookInput {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }

    /// Check that title and author are present and non-empty
    pub fn into_data(self) -> AppResult<BookData> {
        if self.validate().is_err() {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        match (self.title, self.author) {
            (Some(title), Some(author)) => Ok(BookData { title, author }),
            _ => Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}
