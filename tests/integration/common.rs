use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use library_server::{
    api, config::PaginationConfig, repository::MemoryStore, services::Services, AppConfig,
    AppState,
};

pub fn memory_services() -> Services {
    Services::new(Arc::new(MemoryStore::new()), PaginationConfig::default())
}

pub fn app() -> Router {
    api::create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(memory_services()),
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// 13-digit ISBN unique enough for a shared test database
pub fn unique_isbn() -> String {
    format!("{:013}", Uuid::new_v4().as_u128() % 10u128.pow(13))
}

pub async fn create_author(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/authors",
        Some(json!({ "name": name, "biography": null })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

pub async fn create_publisher(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/publishers",
        Some(json!({ "name": name, "location": "London" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

pub fn book_body(author: &Value, publisher: &Value, quantity: i32) -> Value {
    json!({
        "title": "The Left Hand of Darkness",
        "isbn": unique_isbn(),
        "author_id": author["id"],
        "publisher_id": publisher["id"],
        "year": 1969,
        "genre": "Science Fiction",
        "quantity": quantity
    })
}

/// Creates an author, a publisher and a book with `quantity` copies
pub async fn seed_book(app: &Router, quantity: i32) -> Value {
    let author = create_author(app, "Ursula K. Le Guin").await;
    let publisher = create_publisher(app, &format!("Ace Books {}", Uuid::new_v4())).await;
    let (status, book) = send(
        app,
        Method::POST,
        "/api/v1/books",
        Some(book_body(&author, &publisher, quantity)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", book);
    book
}
