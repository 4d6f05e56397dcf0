//! Catalog management service: authors, publishers and books

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::PaginationConfig,
    error::AppResult,
    models::{
        Author, Book, BookDetails, CreateAuthor, CreateBook, CreatePublisher, ListQuery,
        PageRequest, Paginated, Publisher, UpdateBook,
    },
    repository::{AuthorRepository, BookRepository, PublisherRepository},
};

#[derive(Clone)]
pub struct CatalogService {
    authors: Arc<dyn AuthorRepository>,
    publishers: Arc<dyn PublisherRepository>,
    books: Arc<dyn BookRepository>,
    pagination: PaginationConfig,
}

impl CatalogService {
    pub fn new(
        authors: Arc<dyn AuthorRepository>,
        publishers: Arc<dyn PublisherRepository>,
        books: Arc<dyn BookRepository>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            authors,
            publishers,
            books,
            pagination,
        }
    }

    fn page(&self, query: &ListQuery) -> PageRequest {
        PageRequest::from_query(query, &self.pagination)
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        let author = self.authors.create_author(&Author::new(data)).await?;
        tracing::info!("Created author {} ({})", author.id, author.name);
        Ok(author)
    }

    pub async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        self.authors.get_author(id).await
    }

    pub async fn list_authors(&self, query: &ListQuery) -> AppResult<Paginated<Author>> {
        let page = self.page(query);
        let (authors, total) = self.authors.list_authors(page).await?;
        Ok(Paginated::new(authors, total, page))
    }

    // =========================================================================
    // PUBLISHERS
    // =========================================================================

    pub async fn create_publisher(&self, data: CreatePublisher) -> AppResult<Publisher> {
        let publisher = self.publishers.create_publisher(&Publisher::new(data)).await?;
        tracing::info!("Created publisher {} ({})", publisher.id, publisher.name);
        Ok(publisher)
    }

    pub async fn get_publisher(&self, id: Uuid) -> AppResult<Publisher> {
        self.publishers.get_publisher(id).await
    }

    pub async fn list_publishers(&self, query: &ListQuery) -> AppResult<Paginated<Publisher>> {
        let page = self.page(query);
        let (publishers, total) = self.publishers.list_publishers(page).await?;
        Ok(Paginated::new(publishers, total, page))
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    /// Insert a new book with a fresh id and no copies issued
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let book = self.books.create_book(&Book::new(data)).await?;
        tracing::info!("Created book {} (isbn {}, {} copies)", book.id, book.isbn, book.quantity);
        Ok(book)
    }

    pub async fn update_book(&self, id: Uuid, data: UpdateBook) -> AppResult<Book> {
        let book = self.books.update_book(id, &data).await?;
        tracing::info!("Updated book {}", id);
        Ok(book)
    }

    /// Delete a book. Copies still issued are not checked.
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.books.delete_book(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<BookDetails> {
        self.books.get_book(id).await
    }

    pub async fn list_books(&self, query: &ListQuery) -> AppResult<Paginated<BookDetails>> {
        let page = self.page(query);
        let (books, total) = self.books.list_books(page).await?;
        tracing::debug!("Listed {} of {} books (page {})", books.len(), total, page.page);
        Ok(Paginated::new(books, total, page))
    }
}
