//! Business logic services

pub mod catalog;
pub mod health;
pub mod inventory;

use std::sync::Arc;

use crate::{config::PaginationConfig, repository::Store};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub inventory: inventory::InventoryService,
    pub health: health::HealthService,
}

impl Services {
    /// Wire every service to the same backing store
    pub fn new<S: Store + 'static>(store: Arc<S>, pagination: PaginationConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                pagination,
            ),
            inventory: inventory::InventoryService::new(store.clone()),
            health: health::HealthService::new(store),
        }
    }
}
