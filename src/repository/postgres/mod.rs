//! PostgreSQL-backed store

mod authors;
mod books;
mod inventory;
mod publishers;

use async_trait::async_trait;
use sqlx::{migrate::MigrateError, PgConnection, Pool, Postgres};
use std::time::Duration;
use uuid::Uuid;

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
    lock_timeout: Duration,
}

impl PgStore {
    /// `lock_timeout` bounds how long a transaction waits for a book row lock
    pub fn new(pool: Pool<Postgres>, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }

    /// Apply pending schema migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Lock a book row for the rest of the current transaction and read it.
    ///
    /// Sets a transaction-local `lock_timeout` first, so a waiter gives up with
    /// SQLSTATE 55P03 instead of blocking forever.
    async fn lock_book(&self, conn: &mut PgConnection, id: Uuid) -> AppResult<Book> {
        // SET cannot take bind parameters; the value is an integer we control.
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            self.lock_timeout.as_millis()
        ))
        .execute(&mut *conn)
        .await?;

        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
