//! Authors table

use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, PageRequest},
    repository::AuthorRepository,
};

#[async_trait]
impl AuthorRepository for PgStore {
    async fn create_author(&self, author: &Author) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, biography, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(author.id)
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.created_at)
        .bind(author.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    async fn list_authors(&self, page: PageRequest) -> AppResult<(Vec<Author>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY created_at, id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((authors, total))
    }
}
