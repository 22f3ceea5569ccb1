//! One observable operation per books endpoint.
//!
//! Each hook pairs a [`BooksClient`] call with an [`AsyncOperation`] so callers
//! can read `loading`, `error` and the latest result at any time. After a
//! mutation, callers reload the list with [`UseBooks::refetch`].

use super::{operation::AsyncOperation, BooksClient, Snapshot};
use crate::models::book::{Book, BookInput};

pub const LIST_FALLBACK: &str = "An unexpected error occurred";
pub const FETCH_FALLBACK: &str = "Failed to fetch book";
pub const CREATE_FALLBACK: &str = "Failed to create book";
pub const UPDATE_FALLBACK: &str = "Failed to update book";
pub const DELETE_FALLBACK: &str = "Failed to delete book";

/// The full book list, fetched once on mount
#[derive(Clone)]
pub struct UseBooks {
    client: BooksClient,
    operation: AsyncOperation<Vec<Book>>,
}

impl UseBooks {
    /// Create the hook and start the initial fetch in the background.
    /// Must be called from within a tokio runtime.
    pub fn mount(client: BooksClient) -> Self {
        let hook = Self {
            client,
            operation: AsyncOperation::new(LIST_FALLBACK),
        };
        let client = hook.client.clone();
        hook.operation.spawn(async move { client.list_books().await });
        hook
    }

    pub async fn refetch(&self) -> Option<Vec<Book>> {
        self.operation.run(self.client.list_books()).await
    }

    /// Last successfully fetched list, empty before the first success
    pub fn books(&self) -> Vec<Book> {
        self.operation.data().unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.operation.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    pub async fn settled(&self) -> Snapshot<Vec<Book>> {
        self.operation.settled().await
    }
}

/// A single book, fetched whenever an id is set
#[derive(Clone)]
pub struct UseBook {
    client: BooksClient,
    id: Option<String>,
    operation: AsyncOperation<Option<Book>>,
}

impl UseBook {
    /// Create the hook; fetches in the background when `id` is set
    pub fn mount(client: BooksClient, id: Option<String>) -> Self {
        let mut hook = Self {
            client,
            id: None,
            operation: AsyncOperation::new(FETCH_FALLBACK),
        };
        hook.set_id(id);
        hook
    }

    /// Switch to another id. Setting the current id again does nothing;
    /// `None` clears the book and any error.
    pub fn set_id(&mut self, id: Option<String>) {
        if id == self.id {
            return;
        }
        self.id = id;
        match self.id.clone() {
            Some(id) => {
                let client = self.client.clone();
                self.operation.spawn(async move { client.get_book(&id).await });
            }
            None => self.operation.reset(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Fetch the current id again. Returns `false` when no id is set.
    pub async fn refetch(&self) -> bool {
        match &self.id {
            Some(id) => {
                self.operation.run(self.client.get_book(id)).await;
                true
            }
            None => false,
        }
    }

    /// The fetched book; `None` before a fetch or when the id is unknown
    pub fn book(&self) -> Option<Book> {
        self.operation.data().flatten()
    }

    pub fn loading(&self) -> bool {
        self.operation.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    pub async fn settled(&self) -> Snapshot<Option<Book>> {
        self.operation.settled().await
    }
}

#[derive(Clone)]
pub struct UseCreateBook {
    client: BooksClient,
    operation: AsyncOperation<Book>,
}

impl UseCreateBook {
    pub fn new(client: BooksClient) -> Self {
        Self {
            client,
            operation: AsyncOperation::new(CREATE_FALLBACK),
        }
    }

    /// The created book, or `None` with the reason in [`Self::error`]
    pub async fn create_book(&self, input: &BookInput) -> Option<Book> {
        self.operation.run(self.client.create_book(input)).await
    }

    pub fn loading(&self) -> bool {
        self.operation.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    pub fn clear_error(&self) {
        self.operation.clear_error();
    }
}

#[derive(Clone)]
pub struct UseUpdateBook {
    client: BooksClient,
    operation: AsyncOperation<Book>,
}

impl UseUpdateBook {
    pub fn new(client: BooksClient) -> Self {
        Self {
            client,
            operation: AsyncOperation::new(UPDATE_FALLBACK),
        }
    }

    pub async fn update_book(&self, id: &str, input: &BookInput) -> Option<Book> {
        self.operation.run(self.client.update_book(id, input)).await
    }

    pub fn loading(&self) -> bool {
        self.operation.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    pub fn clear_error(&self) {
        self.operation.clear_error();
    }
}

#[derive(Clone)]
pub struct UseDeleteBook {
    client: BooksClient,
    operation: AsyncOperation<bool>,
}

impl UseDeleteBook {
    pub fn new(client: BooksClient) -> Self {
        Self {
            client,
            operation: AsyncOperation::new(DELETE_FALLBACK),
        }
    }

    /// `true` once the server confirmed the deletion
    pub async fn delete_book(&self, id: &str) -> bool {
        let call = async { self.client.delete_book(id).await.map(|_| true) };
        self.operation.run(call).await.unwrap_or(false)
    }

    pub fn loading(&self) -> bool {
        self.operation.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    pub fn clear_error(&self) {
        self.operation.clear_error();
    }
}
