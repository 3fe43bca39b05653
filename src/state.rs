use std::sync::Arc;

use crate::store::RecordStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}
