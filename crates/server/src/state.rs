use std::sync::Arc;

use service::records::RecordStore;

/// Shared handler state. Holds only the store handle; records are re-read
/// on every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}
