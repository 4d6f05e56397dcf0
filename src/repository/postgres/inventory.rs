//! Issue/return transactions over `SELECT ... FOR UPDATE`

use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::{error::AppResult, models::Book, repository::InventoryRepository};

impl PgStore {
    /// Lock the row, run the counter transition, persist and commit.
    ///
    /// Any error returns before commit; dropping the transaction rolls it back
    /// and releases the lock. The same holds when the calling future is dropped.
    async fn transition<F>(&self, id: Uuid, apply: F) -> AppResult<Book>
    where
        F: FnOnce(&mut Book) -> AppResult<()> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut book = self.lock_book(&mut *tx, id).await?;
        apply(&mut book)?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET quantity_issued = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(book.quantity_issued)
        .bind(book.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}

#[async_trait]
impl InventoryRepository for PgStore {
    async fn issue_copy(&self, id: Uuid) -> AppResult<Book> {
        self.transition(id, Book::issue).await
    }

    async fn return_copy(&self, id: Uuid) -> AppResult<Book> {
        self.transition(id, Book::return_copy).await
    }
}
