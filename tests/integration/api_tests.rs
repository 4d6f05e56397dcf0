//! HTTP API tests over the in-memory store

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{app, book_body, create_author, create_publisher, seed_book, send};

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{id}/issue"].is_object());
}

#[tokio::test]
async fn test_issue_and_return_cycle() {
    let app = app();
    let book = seed_book(&app, 2).await;
    let id = book["id"].as_str().unwrap();
    assert_eq!(book["quantity_issued"], 0);

    let issue = format!("/api/v1/books/{}/issue", id);
    let ret = format!("/api/v1/books/{}/return", id);

    let (status, body) = send(&app, Method::POST, &issue, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity_issued"], 1);

    let (status, body) = send(&app, Method::POST, &issue, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity_issued"], 2);

    let (status, body) = send(&app, Method::POST, &issue, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "NoCopyAvailable");

    let (status, body) = send(&app, Method::POST, &ret, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity_issued"], 1);

    let (status, body) = send(&app, Method::POST, &ret, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity_issued"], 0);

    let (status, body) = send(&app, Method::POST, &ret, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "NothingToReturn");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["quantity_issued"], 0);
    assert_eq!(body["author"]["name"], "Ursula K. Le Guin");
    assert_eq!(body["publisher"]["location"], "London");
}

#[tokio::test]
async fn test_zero_quantity_book_cannot_be_issued() {
    let app = app();
    let book = seed_book(&app, 0).await;
    let id = book["id"].as_str().unwrap();

    let (status, _) = send(&app, Method::POST, &format!("/api/v1/books/{}/issue", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_book_validation() {
    let app = app();
    let author = create_author(&app, "Octavia E. Butler").await;
    let publisher = create_publisher(&app, "Warner Books").await;

    let mut short_isbn = book_body(&author, &publisher, 1);
    short_isbn["isbn"] = json!("978044660377");
    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(short_isbn)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let mut bad_year = book_body(&author, &publisher, 1);
    bad_year["year"] = json!(999);
    let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(bad_year)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut negative = book_body(&author, &publisher, 1);
    negative["quantity"] = json!(-1);
    let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(json!({ "title": "Kindred" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_book_rejects_unknown_author() {
    let app = app();
    let author = create_author(&app, "Octavia E. Butler").await;
    let publisher = create_publisher(&app, "Warner Books").await;

    let mut body = book_body(&author, &publisher, 1);
    body["author_id"] = json!(uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ConstraintViolation");
}

#[tokio::test]
async fn test_create_book_rejects_duplicate_isbn() {
    let app = app();
    let author = create_author(&app, "Octavia E. Butler").await;
    let publisher = create_publisher(&app, "Warner Books").await;

    let body = book_body(&author, &publisher, 1);
    let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ConstraintViolation");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/v1/books/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/v1/books/42/issue", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_book() {
    let app = app();
    let id = uuid::Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Transitions on a missing book are conflicts, not 404s
    let (status, _) = send(&app, Method::POST, &format!("/api/v1/books/{}/issue", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, &format!("/api/v1/books/{}/return", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_cannot_drop_below_issued() {
    let app = app();
    let book = seed_book(&app, 3).await;
    let id = book["id"].as_str().unwrap();

    for _ in 0..2 {
        let (status, _) =
            send(&app, Method::POST, &format!("/api/v1/books/{}/issue", id), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let mut update = book.clone();
    update["quantity"] = json!(1);
    let (status, _) = send(&app, Method::PUT, &format!("/api/v1/books/{}", id), Some(update.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    update["quantity"] = json!(2);
    update["title"] = json!("The Dispossessed");
    let (status, body) = send(&app, Method::PUT, &format!("/api/v1/books/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["quantity_issued"], 2);
    assert_eq!(body["title"], "The Dispossessed");
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = app();
    let book = seed_book(&app, 1).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/books/{}", uuid::Uuid::new_v4()),
        Some(book),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let book = seed_book(&app, 1).await;
    let uri = format!("/api/v1/books/{}", book["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_books_pagination() {
    let app = app();
    let author = create_author(&app, "N. K. Jemisin").await;
    let publisher = create_publisher(&app, "Orbit").await;
    for _ in 0..3 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/books",
            Some(book_body(&author, &publisher, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/books?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["data"][0]["author"]["name"], "N. K. Jemisin");

    let (_, body) = send(&app, Method::GET, "/api/v1/books?page=2&limit=2", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/books?page=3&limit=2", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 3);

    let (_, body) = send(&app, Method::GET, "/api/v1/books?page=0&limit=1000", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 100);

    let (_, body) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(body["limit"], 10);

    let (status, _) = send(&app, Method::GET, "/api/v1/books?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_with_huge_page_number() {
    let app = app();
    seed_book(&app, 1).await;

    for resource in ["books", "authors", "publishers"] {
        let uri = format!("/api/v1/{}?page={}&limit=100", resource, i64::MAX);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", resource);
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], 1);
        assert_eq!(body["page"], i64::MAX);
    }
}

#[tokio::test]
async fn test_authors_and_publishers() {
    let app = app();
    let author = create_author(&app, "Ted Chiang").await;
    let id = author["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ted Chiang");

    let (_, body) = send(&app, Method::GET, "/api/v1/authors", None).await;
    assert_eq!(body["total"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/authors",
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_publisher(&app, "Tor").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/publishers",
        Some(json!({ "name": "Tor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ConstraintViolation");

    let (_, body) = send(&app, Method::GET, "/api/v1/publishers", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["name"], "Tor");
}
