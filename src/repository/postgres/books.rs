//! Books table: catalog reads and writes

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetails, PageRequest, Publisher, UpdateBook},
    repository::BookRepository,
};

const BOOK_DETAILS_SELECT: &str = r#"
    SELECT b.id, b.title, b.isbn, b.author_id, b.publisher_id, b.year, b.genre,
           b.quantity, b.quantity_issued, b.created_at, b.updated_at,
           a.name AS author_name, a.biography AS author_biography,
           a.created_at AS author_created_at, a.updated_at AS author_updated_at,
           p.name AS publisher_name, p.location AS publisher_location,
           p.created_at AS publisher_created_at, p.updated_at AS publisher_updated_at
    FROM books b
    JOIN authors a ON a.id = b.author_id
    JOIN publishers p ON p.id = b.publisher_id
"#;

fn book_details_from_row(row: &PgRow) -> Result<BookDetails, sqlx::Error> {
    let author_id: Uuid = row.try_get("author_id")?;
    let publisher_id: Uuid = row.try_get("publisher_id")?;

    Ok(BookDetails {
        book: Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            isbn: row.try_get("isbn")?,
            author_id,
            publisher_id,
            year: row.try_get("year")?,
            genre: row.try_get("genre")?,
            quantity: row.try_get("quantity")?,
            quantity_issued: row.try_get("quantity_issued")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        author: Author {
            id: author_id,
            name: row.try_get("author_name")?,
            biography: row.try_get("author_biography")?,
            created_at: row.try_get("author_created_at")?,
            updated_at: row.try_get("author_updated_at")?,
        },
        publisher: Publisher {
            id: publisher_id,
            name: row.try_get("publisher_name")?,
            location: row.try_get("publisher_location")?,
            created_at: row.try_get("publisher_created_at")?,
            updated_at: row.try_get("publisher_updated_at")?,
        },
    })
}

#[async_trait]
impl BookRepository for PgStore {
    async fn create_book(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                id, title, isbn, author_id, publisher_id, year, genre,
                quantity, quantity_issued, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.year)
        .bind(&book.genre)
        .bind(book.quantity)
        .bind(book.quantity_issued)
        .bind(book.created_at)
        .bind(book.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_book(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        // Same row lock as issue/return, so the quantity guard cannot race a
        // concurrent issue.
        let mut book = self.lock_book(&mut *tx, id).await?;
        book.apply_update(data)?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, isbn = $3, author_id = $4, publisher_id = $5,
                year = $6, genre = $7, quantity = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.year)
        .bind(&book.genre)
        .bind(book.quantity)
        .bind(book.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    async fn get_book(&self, id: Uuid) -> AppResult<BookDetails> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", BOOK_DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(book_details_from_row(&row)?)
    }

    async fn list_books(&self, page: PageRequest) -> AppResult<(Vec<BookDetails>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "{} ORDER BY b.created_at, b.id LIMIT $1 OFFSET $2",
            BOOK_DETAILS_SELECT
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .iter()
            .map(book_details_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((books, total))
    }
}
