//! Book endpoints: catalog CRUD plus issue/return of copies

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{pagination::BookPage, Book, BookDetails, CreateBook, ListQuery, UpdateBook},
    AppState,
};

use super::{list_query, PathId, ValidatedJson};

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of books with author and publisher", body = BookPage),
        (status = 400, description = "Malformed page or limit", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<BookPage>> {
    let query = list_query(query)?;
    let page = state.services.catalog.list_books(&query).await?;
    Ok(Json(page))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input, duplicate ISBN or unknown author/publisher", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace the mutable fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input or quantity below issued copies", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(id, data).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Issue one copy of a book
#[utoipa::path(
    post,
    path = "/books/{id}/issue",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copy issued", body = Book),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 409, description = "No copies available or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_book(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .inventory
        .issue_copy(id)
        .await
        .map_err(|e| e.in_transition_context())?;
    Ok(Json(book))
}

/// Return one copy of a book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copy returned", body = Book),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 409, description = "Nothing to return or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .inventory
        .return_copy(id)
        .await
        .map_err(|e| e.in_transition_context())?;
    Ok(Json(book))
}
