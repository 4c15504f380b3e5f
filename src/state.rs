use std::sync::Arc;

use crate::config::Config;
use crate::models::Conference;
use crate::store::ChairStore;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChairStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: impl ChairStore + 'static, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Who is asking, and for which conference.
///
/// Inserted into the request extensions by the chair middleware once the
/// caller has been verified as a chair of `conference`.
#[derive(Debug, Clone)]
pub struct ChairContext {
    pub user_id: i64,
    pub conference: Conference,
}
