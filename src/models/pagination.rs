//! Pagination query, normalised page window and list envelope

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{author::Author, book::BookDetails, publisher::Publisher};
use crate::config::PaginationConfig;

/// Raw `?page=&limit=` query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, 1-indexed (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 10)
    pub limit: Option<i64>,
}

/// Normalised page window handed to the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp a raw query: page < 1 becomes 1, a missing or non-positive limit
    /// becomes the default, and limits above the maximum are capped.
    pub fn from_query(query: &ListQuery, config: &PaginationConfig) -> Self {
        let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = query
            .limit
            .filter(|l| *l >= 1)
            .unwrap_or(config.default_limit)
            .min(config.max_limit);
        Self { page, limit }
    }

    /// Rows to skip. Saturates, since `page` has no upper bound.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(
    BookPage = Paginated<BookDetails>,
    AuthorPage = Paginated<Author>,
    PublisherPage = Paginated<Publisher>
)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Total number of records across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: PageRequest) -> Self {
        Self {
            data,
            total,
            page: page.page,
            limit: page.limit,
        }
    }
}
