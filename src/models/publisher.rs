//! Publisher model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Publisher record. Names are unique across all publishers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publisher {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Publisher {
    pub fn new(data: CreatePublisher) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            location: data.location,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create publisher request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePublisher {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location: Option<String>,
}
