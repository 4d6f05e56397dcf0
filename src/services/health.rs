//! Store reachability for the readiness probe

use std::sync::Arc;

use crate::{error::AppResult, repository::Store};

#[derive(Clone)]
pub struct HealthService {
    store: Arc<dyn Store>,
}

impl HealthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn check_store(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
