//! In-memory store with per-book row locks.
//!
//! Mirrors the Postgres store closely enough to run the service and its tests
//! without a database: every book row sits behind its own async mutex that
//! issue, return and update hold for their whole read-check-write cycle, and
//! lock waits are bounded by the configured timeout.
//!
//! Lock order is always row before catalog. Nothing waits on a row lock while
//! holding the catalog lock, so a slow row only stalls callers of that row.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use super::{AuthorRepository, BookRepository, InventoryRepository, PublisherRepository, Store};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetails, PageRequest, Publisher, UpdateBook},
};

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

struct BookRow {
    book: Book,
    /// Set by delete once it owns the lock; waiters that wake up afterwards see NotFound
    deleted: bool,
}

type RowHandle = Arc<Mutex<BookRow>>;

#[derive(Default)]
struct Catalog {
    authors: IndexMap<Uuid, Author>,
    publishers: IndexMap<Uuid, Publisher>,
    books: IndexMap<Uuid, RowHandle>,
    isbns: HashMap<String, Uuid>,
}

impl Catalog {
    fn book_handle(&self, id: Uuid) -> AppResult<RowHandle> {
        self.books
            .get(&id)
            .cloned()
            .ok_or_else(|| book_not_found(id))
    }

    /// Foreign keys and unique ISBN, as the SQL schema enforces them
    fn check_references(&self, book: &Book) -> AppResult<()> {
        if let Some(owner) = self.isbns.get(&book.isbn) {
            if *owner != book.id {
                return Err(AppError::ConstraintViolation(format!(
                    "ISBN {} already exists",
                    book.isbn
                )));
            }
        }
        if !self.authors.contains_key(&book.author_id) {
            return Err(AppError::ConstraintViolation(format!(
                "Author {} does not exist",
                book.author_id
            )));
        }
        if !self.publishers.contains_key(&book.publisher_id) {
            return Err(AppError::ConstraintViolation(format!(
                "Publisher {} does not exist",
                book.publisher_id
            )));
        }
        Ok(())
    }

    fn details(&self, book: Book) -> AppResult<BookDetails> {
        let author = self
            .authors
            .get(&book.author_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Book {} has no author", book.id)))?;
        let publisher = self
            .publishers
            .get(&book.publisher_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Book {} has no publisher", book.id)))?;
        Ok(BookDetails {
            book,
            author,
            publisher,
        })
    }
}

/// Column checks from the SQL schema, including `chk_quantity_issued_valid`
fn check_columns(book: &Book) -> AppResult<()> {
    if book.isbn.chars().count() != 13 {
        return Err(AppError::ConstraintViolation("ISBN must be 13 characters".to_string()));
    }
    if !(1000..=9999).contains(&book.year) {
        return Err(AppError::ConstraintViolation(format!("Invalid year {}", book.year)));
    }
    if book.quantity < 0 || book.quantity_issued < 0 || book.quantity_issued > book.quantity {
        return Err(AppError::ConstraintViolation(
            "chk_quantity_issued_valid".to_string(),
        ));
    }
    Ok(())
}

fn book_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

fn window<T>(items: impl Iterator<Item = T>, page: PageRequest) -> impl Iterator<Item = T> {
    items
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit).unwrap_or(0))
}

#[derive(Clone)]
pub struct MemoryStore {
    catalog: Arc<RwLock<Catalog>>,
    lock_timeout: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog::default())),
            lock_timeout,
        }
    }

    async fn lock_row(&self, id: Uuid, handle: RowHandle) -> AppResult<OwnedMutexGuard<BookRow>> {
        let row = tokio::time::timeout(self.lock_timeout, handle.lock_owned())
            .await
            .map_err(|_| {
                AppError::LockTimeout(format!(
                    "book {} still locked after {:?}",
                    id, self.lock_timeout
                ))
            })?;
        if row.deleted {
            return Err(book_not_found(id));
        }
        Ok(row)
    }

    async fn lock_book(&self, id: Uuid) -> AppResult<OwnedMutexGuard<BookRow>> {
        let handle = self.catalog.read().await.book_handle(id)?;
        self.lock_row(id, handle).await
    }

    /// Runs `apply` on a copy under the row lock and writes it back only on success
    async fn transition<F>(&self, id: Uuid, apply: F) -> AppResult<Book>
    where
        F: FnOnce(&mut Book) -> AppResult<()> + Send,
    {
        let mut row = self.lock_book(id).await?;
        let mut book = row.book.clone();
        apply(&mut book)?;
        check_columns(&book)?;
        row.book = book.clone();
        Ok(book)
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn create_author(&self, author: &Author) -> AppResult<Author> {
        let mut catalog = self.catalog.write().await;
        if catalog.authors.contains_key(&author.id) {
            return Err(AppError::ConstraintViolation(format!("Author {} already exists", author.id)));
        }
        catalog.authors.insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        self.catalog
            .read()
            .await
            .authors
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    async fn list_authors(&self, page: PageRequest) -> AppResult<(Vec<Author>, i64)> {
        let catalog = self.catalog.read().await;
        let authors = window(catalog.authors.values().cloned(), page).collect();
        Ok((authors, catalog.authors.len() as i64))
    }
}

#[async_trait]
impl PublisherRepository for MemoryStore {
    async fn create_publisher(&self, publisher: &Publisher) -> AppResult<Publisher> {
        let mut catalog = self.catalog.write().await;
        if catalog.publishers.values().any(|p| p.name == publisher.name) {
            return Err(AppError::ConstraintViolation(format!(
                "Publisher name '{}' already exists",
                publisher.name
            )));
        }
        catalog.publishers.insert(publisher.id, publisher.clone());
        Ok(publisher.clone())
    }

    async fn get_publisher(&self, id: Uuid) -> AppResult<Publisher> {
        self.catalog
            .read()
            .await
            .publishers
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Publisher with id {} not found", id)))
    }

    async fn list_publishers(&self, page: PageRequest) -> AppResult<(Vec<Publisher>, i64)> {
        let catalog = self.catalog.read().await;
        let publishers = window(catalog.publishers.values().cloned(), page).collect();
        Ok((publishers, catalog.publishers.len() as i64))
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn create_book(&self, book: &Book) -> AppResult<Book> {
        let mut catalog = self.catalog.write().await;
        if catalog.books.contains_key(&book.id) {
            return Err(AppError::ConstraintViolation(format!("Book {} already exists", book.id)));
        }
        catalog.check_references(book)?;
        check_columns(book)?;

        catalog.isbns.insert(book.isbn.clone(), book.id);
        catalog.books.insert(
            book.id,
            Arc::new(Mutex::new(BookRow {
                book: book.clone(),
                deleted: false,
            })),
        );
        Ok(book.clone())
    }

    async fn update_book(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let mut row = self.lock_book(id).await?;

        let mut book = row.book.clone();
        book.apply_update(data)?;

        let mut catalog = self.catalog.write().await;
        catalog.check_references(&book)?;
        check_columns(&book)?;

        if book.isbn != row.book.isbn {
            catalog.isbns.remove(&row.book.isbn);
            catalog.isbns.insert(book.isbn.clone(), id);
        }
        row.book = book.clone();
        Ok(book)
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        // Waits out any transition in flight; waiters queued behind us see the tombstone.
        let mut row = self.lock_book(id).await?;

        let mut catalog = self.catalog.write().await;
        catalog.books.shift_remove(&id);
        catalog.isbns.retain(|_, owner| *owner != id);
        row.deleted = true;
        Ok(())
    }

    async fn get_book(&self, id: Uuid) -> AppResult<BookDetails> {
        let book = self.lock_book(id).await?.book.clone();
        self.catalog.read().await.details(book)
    }

    async fn list_books(&self, page: PageRequest) -> AppResult<(Vec<BookDetails>, i64)> {
        let (handles, total) = {
            let catalog = self.catalog.read().await;
            let handles: Vec<(Uuid, RowHandle)> = window(catalog.books.iter(), page)
                .map(|(id, handle)| (*id, handle.clone()))
                .collect();
            (handles, catalog.books.len() as i64)
        };

        let mut rows = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            match self.lock_row(id, handle).await {
                Ok(row) => rows.push(row.book.clone()),
                // deleted since the snapshot
                Err(AppError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        let catalog = self.catalog.read().await;
        let books = rows
            .into_iter()
            .map(|book| catalog.details(book))
            .collect::<AppResult<Vec<_>>>()?;
        Ok((books, total))
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn issue_copy(&self, id: Uuid) -> AppResult<Book> {
        self.transition(id, Book::issue).await
    }

    async fn return_copy(&self, id: Uuid) -> AppResult<Book> {
        self.transition(id, Book::return_copy).await
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
