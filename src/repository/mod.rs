//! Repository layer: store capabilities and their implementations.
//!
//! The catalog (authors, publishers, books) and the inventory transaction
//! engine are separate capability traits so services depend only on what they
//! use. [`postgres::PgStore`] backs production; [`memory::MemoryStore`] is an
//! in-process fake with the same locking semantics.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetails, PageRequest, Publisher, UpdateBook},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn create_author(&self, author: &Author) -> AppResult<Author>;

    async fn get_author(&self, id: Uuid) -> AppResult<Author>;

    /// Page of authors in creation order, plus the total count
    async fn list_authors(&self, page: PageRequest) -> AppResult<(Vec<Author>, i64)>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherRepository: Send + Sync {
    /// Fails with `ConstraintViolation` when the name is already taken
    async fn create_publisher(&self, publisher: &Publisher) -> AppResult<Publisher>;

    async fn get_publisher(&self, id: Uuid) -> AppResult<Publisher>;

    async fn list_publishers(&self, page: PageRequest) -> AppResult<(Vec<Publisher>, i64)>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Fails with `ConstraintViolation` on duplicate ISBN or a dangling
    /// author/publisher reference
    async fn create_book(&self, book: &Book) -> AppResult<Book>;

    /// Replace the mutable fields of a book under its row lock. Rejects a
    /// quantity below the current `quantity_issued`.
    async fn update_book(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book>;

    /// Unconditional delete, outstanding issued copies included
    async fn delete_book(&self, id: Uuid) -> AppResult<()>;

    async fn get_book(&self, id: Uuid) -> AppResult<BookDetails>;

    /// Page of books in creation order with relations attached, plus the total count
    async fn list_books(&self, page: PageRequest) -> AppResult<(Vec<BookDetails>, i64)>;
}

/// Transactional issue/return of book copies.
///
/// Implementations lock the book row exclusively, re-read the counters under
/// the lock, check the transition, write and release. A caller dropped
/// mid-flight leaves no partial change behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// `quantity_issued += 1`, or `CapacityExceeded` when no copy is left
    async fn issue_copy(&self, id: Uuid) -> AppResult<Book>;

    /// `quantity_issued -= 1`, or `InvalidReturn` when nothing is outstanding
    async fn return_copy(&self, id: Uuid) -> AppResult<Book>;
}

/// Everything a backing store provides
#[async_trait]
pub trait Store:
    AuthorRepository + PublisherRepository + BookRepository + InventoryRepository
{
    /// Round-trip to the backing store, used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}
