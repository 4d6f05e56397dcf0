//! Author endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{pagination::AuthorPage, Author, CreateAuthor, ListQuery},
    AppState,
};

use super::{list_query, PathId, ValidatedJson};

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of authors", body = AuthorPage)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<AuthorPage>> {
    let query = list_query(query)?;
    Ok(Json(state.services.catalog.list_authors(&query).await?))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.catalog.get_author(id).await?))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.catalog.create_author(data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}
