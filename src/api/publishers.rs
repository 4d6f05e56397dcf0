//! Publisher endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{pagination::PublisherPage, CreatePublisher, ListQuery, Publisher},
    AppState,
};

use super::{list_query, PathId, ValidatedJson};

/// List publishers
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of publishers", body = PublisherPage)
    )
)]
pub async fn list_publishers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<PublisherPage>> {
    let query = list_query(query)?;
    Ok(Json(state.services.catalog.list_publishers(&query).await?))
}

/// Get publisher by ID
#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    params(("id" = Uuid, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher details", body = Publisher),
        (status = 404, description = "Publisher not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_publisher(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Publisher>> {
    Ok(Json(state.services.catalog.get_publisher(id).await?))
}

/// Create a publisher
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    request_body = CreatePublisher,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid input or name already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_publisher(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreatePublisher>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    let publisher = state.services.catalog.create_publisher(data).await?;
    Ok((StatusCode::CREATED, Json(publisher)))
}
