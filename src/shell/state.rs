use std::sync::Arc;

use crate::modules::time_entries::repository::CacheAsideRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<CacheAsideRepository>,
}
