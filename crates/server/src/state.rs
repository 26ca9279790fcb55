use std::sync::Arc;

use service::Storage;

/// Shared handler state. Cloned per request; the storage itself is shared.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
