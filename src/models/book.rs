//! Book model, request payloads and the issue/return counter transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{author::Author, publisher::Publisher};
use crate::error::{AppError, AppResult};

/// Book row. `quantity_issued` always satisfies `0 <= quantity_issued <= quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// 13-character ISBN, unique across the catalog
    pub isbn: String,
    pub author_id: Uuid,
    pub publisher_id: Uuid,
    pub year: i32,
    pub genre: String,
    /// Total copies owned
    pub quantity: i32,
    /// Copies currently lent out
    pub quantity_issued: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new book with no copies issued
    pub fn new(data: CreateBook) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            isbn: data.isbn,
            author_id: data.author_id,
            publisher_id: data.publisher_id,
            year: data.year,
            genre: data.genre,
            quantity: data.quantity,
            quantity_issued: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Lend out one copy. Must be called with the book row locked.
    pub fn issue(&mut self) -> AppResult<()> {
        if self.quantity_issued >= self.quantity {
            return Err(AppError::CapacityExceeded(self.id));
        }
        self.quantity_issued += 1;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Take back one copy. Must be called with the book row locked.
    pub fn return_copy(&mut self) -> AppResult<()> {
        if self.quantity_issued <= 0 {
            return Err(AppError::InvalidReturn(self.id));
        }
        self.quantity_issued -= 1;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace every mutable scalar field. `quantity_issued` is left alone, and a
    /// quantity below the outstanding count is rejected.
    pub fn apply_update(&mut self, data: &UpdateBook) -> AppResult<()> {
        if data.quantity < self.quantity_issued {
            return Err(AppError::Validation(format!(
                "quantity ({}) cannot be less than the number of issued copies ({})",
                data.quantity, self.quantity_issued
            )));
        }
        self.title = data.title.clone();
        self.isbn = data.isbn.clone();
        self.author_id = data.author_id;
        self.publisher_id = data.publisher_id;
        self.year = data.year;
        self.genre = data.genre.clone();
        self.quantity = data.quantity;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Book with its author and publisher attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
    pub publisher: Publisher,
}

fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(custom(function = "validate_not_nil"))]
    pub author_id: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub publisher_id: Uuid,
    #[validate(range(min = 1000, max = 9999, message = "Year must be between 1000 and 9999"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

/// Update book request. Replaces all mutable fields; `quantity_issued` is not part of it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[validate(custom(function = "validate_not_nil"))]
    pub author_id: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub publisher_id: Uuid,
    #[validate(range(min = 1000, max = 9999, message = "Year must be between 1000 and 9999"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}
