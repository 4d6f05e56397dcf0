//! Issue and return of book copies

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::InventoryRepository,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(inventory: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory }
    }

    /// Lend out one copy of a book
    pub async fn issue_copy(&self, id: Uuid) -> AppResult<Book> {
        match self.inventory.issue_copy(id).await {
            Ok(book) => {
                tracing::info!(
                    "Issued copy of book {} ({}/{} out)",
                    id, book.quantity_issued, book.quantity
                );
                Ok(book)
            }
            Err(e @ AppError::CapacityExceeded(_)) => {
                tracing::warn!("Issue refused for book {}: no copies available", id);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Take back one copy of a book
    pub async fn return_copy(&self, id: Uuid) -> AppResult<Book> {
        match self.inventory.return_copy(id).await {
            Ok(book) => {
                tracing::info!(
                    "Returned copy of book {} ({}/{} out)",
                    id, book.quantity_issued, book.quantity
                );
                Ok(book)
            }
            Err(e @ AppError::InvalidReturn(_)) => {
                tracing::warn!("Return refused for book {}: nothing issued", id);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
