//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod pagination;
pub mod publisher;

// Re-export commonly used types
pub use author::{Author, CreateAuthor};
pub use book::{Book, BookDetails, CreateBook, UpdateBook};
pub use pagination::{ListQuery, PageRequest, Paginated};
pub use publisher::{CreatePublisher, Publisher};
