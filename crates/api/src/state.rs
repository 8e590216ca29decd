use std::sync::Arc;

use crate::{config::Config, services::PostService, stores::Stores};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Persistent stores (Redis).
    pub stores: Stores,
    /// Platform post-creation gateway.
    pub posts: Arc<dyn PostService>,
}
