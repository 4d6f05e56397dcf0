//! API handlers for the library REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod publishers;

use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, models::ListQuery, AppState};

/// `{id}` path segment parsed as a UUID; anything else is a 400
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Uuid::parse_str(&raw)
            .map(PathId)
            .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
    }
}

/// JSON body that has passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `?page=&limit=` with malformed values reported as a 400 JSON error
pub fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> Result<ListQuery, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/issue", post(books::issue_book))
        .route("/books/:id/return", post(books::return_book))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route("/authors/:id", get(authors::get_author))
        // Publishers
        .route(
            "/publishers",
            get(publishers::list_publishers).post(publishers::create_publisher),
        )
        .route("/publishers/:id", get(publishers::get_publisher))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
