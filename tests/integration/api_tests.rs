//! API integration tests

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Send a request through the router and decode the JSON body
async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn create(app: &Router, title: &str, author: &str) -> Value {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": title, "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = common::app();
    let (status, body) = call(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let app = common::app();
    let (status, body) = call(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = common::app();

    let created = create(&app, "Dune", "Herbert").await;
    let id = created["id"].as_str().expect("No book ID").to_string();
    assert_ne!(id, "Dune");
    assert_ne!(id, "Herbert");
    assert_eq!(created["title"], "Dune");

    let (status, list) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().expect("List is not an array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(json!({ "title": "Dune (Revised)", "author": "Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["title"], "Dune (Revised)");

    let (status, deleted) = call(&app, Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);

    let (_, list) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_empty_title_is_rejected() {
    let app = common::app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "", "author": "Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and author are required");

    let (_, list) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_with_missing_author_is_rejected() {
    let app = common::app();
    let input = json!({ "title": "Dune" });
    let (status, body) = call(&app, Method::POST, "/api/books", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and author are required");
}

#[tokio::test]
async fn test_update_validation_leaves_book_unchanged() {
    let app = common::app();
    let created = create(&app, "Dune", "Herbert").await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    let input = json!({ "title": "New", "author": "" });
    let (status, _) = call(&app, Method::PUT, &uri, Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, book) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(book, created);
}

#[tokio::test]
async fn test_read_round_trip() {
    let app = common::app();
    let created = create(&app, "Neuromancer", "Gibson").await;

    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());
    let (status, book) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book, created);
}

#[tokio::test]
async fn test_read_missing_returns_null() {
    let app = common::app();
    let (status, body) = call(&app, Method::GET, "/api/books/does-not-exist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let app = common::app();
    let created = create(&app, "Dune", "Herbert").await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());
    let change = json!({ "title": "Dune Messiah", "author": "Herbert" });

    let (_, first) = call(&app, Method::PUT, &uri, Some(change.clone())).await;
    let (_, second) = call(&app, Method::PUT, &uri, Some(change)).await;
    assert_eq!(first, second);

    let (_, stored) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(stored, second);
}

#[tokio::test]
async fn test_update_ignores_id_in_body() {
    let app = common::app();
    let created = create(&app, "Dune", "Herbert").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(json!({ "id": "other", "title": "Dune", "author": "F. Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let app = common::app();
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/books/missing",
        Some(json!({ "title": "Dune", "author": "Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_twice_fails() {
    let app = common::app();
    let created = create(&app, "Dune", "Herbert").await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, book) = call(&app, Method::GET, &uri, None).await;
    assert!(book.is_null());

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_sorted_bytewise_by_title() {
    let app = common::app();
    for title in ["dune", "Foundation", "Anathem", "hyperion", "Dune"] {
        create(&app, title, "someone").await;
    }

    let (_, list) = call(&app, Method::GET, "/api/books", None).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Anathem", "Dune", "Foundation", "dune", "hyperion"]);
}

#[tokio::test]
async fn test_duplicate_content_creates_two_books() {
    let app = common::app();
    let a = create(&app, "Dune", "Herbert").await;
    let b = create(&app, "Dune", "Herbert").await;
    assert_ne!(a["id"], b["id"]);

    let (_, list) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = common::app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = common::app();
    let (status, doc) = call(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/books"].is_object());
}
