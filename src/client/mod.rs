//! HTTP client for the books API and the observable operations built on it

pub mod hooks;
pub mod listing;
pub mod operation;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::models::book::{Book, BookInput};

pub use hooks::{UseBook, UseBooks, UseCreateBook, UseDeleteBook, UseUpdateBook};
pub use listing::{BookListing, ListingPage};
pub use operation::{AsyncOperation, OperationState, Snapshot};

/// Failure of a call to the books API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The server answered with an error status
    #[error("Request failed with status code {}", .status.as_u16())]
    Api {
        status: StatusCode,
        /// `error` field of the response body, when there was one
        message: Option<String>,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message to show for this failure.
    ///
    /// Prefers the server's `error` field, then the HTTP/transport message,
    /// then `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ClientError::Api { .. } | ClientError::Transport(_) => {
                let message = self.to_string();
                if message.is_empty() {
                    fallback.to_string()
                } else {
                    message
                }
            }
            ClientError::InvalidUrl(_) | ClientError::Decode(_) => fallback.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Thin wrapper over `reqwest` for the `/books` resource
#[derive(Clone, Debug)]
pub struct BooksClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BooksClient {
    /// `base_url` is the API root, e.g. `http://localhost:8080/api`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let url = self.url(&["books"])?;
        send(self.http.get(url)).await
    }

    /// `Ok(None)` when the server has no book with this id
    pub async fn get_book(&self, id: &str) -> Result<Option<Book>, ClientError> {
        let url = self.url(&["books", id])?;
        send(self.http.get(url)).await
    }

    pub async fn create_book(&self, input: &BookInput) -> Result<Book, ClientError> {
        let url = self.url(&["books"])?;
        send(self.http.post(url).json(input)).await
    }

    pub async fn update_book(&self, id: &str, input: &BookInput) -> Result<Book, ClientError> {
        let url = self.url(&["books", id])?;
        send(self.http.put(url).json(input)).await
    }

    /// Returns the deleted record
    pub async fn delete_book(&self, id: &str) -> Result<Book, ClientError> {
        let url = self.url(&["books", id])?;
        send(self.http.delete(url)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        return Err(ClientError::Api { status, message });
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
