//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, publishers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library catalog REST API with transactional issue/return of book copies"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::issue_book,
        books::return_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::pagination::BookPage,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::pagination::AuthorPage,
            // Publishers
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::pagination::PublisherPage,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog and copy circulation"),
        (name = "authors", description = "Author management"),
        (name = "publishers", description = "Publisher management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
