//! Publishers table

use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::{AppError, AppResult},
    models::{PageRequest, Publisher},
    repository::PublisherRepository,
};

#[async_trait]
impl PublisherRepository for PgStore {
    async fn create_publisher(&self, publisher: &Publisher) -> AppResult<Publisher> {
        // a duplicate name surfaces as SQLSTATE 23505 -> ConstraintViolation
        let row = sqlx::query_as::<_, Publisher>(
            r#"
            INSERT INTO publishers (id, name, location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(publisher.id)
        .bind(&publisher.name)
        .bind(&publisher.location)
        .bind(publisher.created_at)
        .bind(publisher.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_publisher(&self, id: Uuid) -> AppResult<Publisher> {
        sqlx::query_as::<_, Publisher>("SELECT * FROM publishers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Publisher with id {} not found", id)))
    }

    async fn list_publishers(&self, page: PageRequest) -> AppResult<(Vec<Publisher>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publishers")
            .fetch_one(&self.pool)
            .await?;

        let publishers = sqlx::query_as::<_, Publisher>(
            "SELECT * FROM publishers ORDER BY created_at, id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((publishers, total))
    }
}
